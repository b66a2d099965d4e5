use axum::{
    body::Body,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::{
    application::{error::ApplicationError, services::CallerAuthenticator},
    domain::models::caller::Caller,
};

/// Middleware resolving the `Authorization: Bearer` header into a [`Caller`]
pub async fn authenticate_caller(
    State(authenticator): State<Arc<dyn CallerAuthenticator>>,
    headers: HeaderMap,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = match headers.get(AUTHORIZATION) {
        Some(header_value) => match header_value.to_str() {
            Ok(value) => match value.strip_prefix("Bearer ") {
                Some(token) => token.trim(),
                None => {
                    warn!("Authorization header is not a bearer credential");
                    return ApplicationError::Unauthorized.into_response();
                }
            },
            Err(_) => {
                warn!("Authorization header contains invalid UTF-8");
                return ApplicationError::BadRequest("Bad request".to_string()).into_response();
            }
        },
        None => {
            warn!("Authorization header is missing");
            return ApplicationError::Unauthorized.into_response();
        }
    };

    match authenticator.authenticate(token) {
        Ok(caller) => {
            debug!("Request authenticated as {}", caller.name);
            request.extensions_mut().insert(caller);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

// Handlers take the caller as an explicit parameter; it is only present on
// routes behind `authenticate_caller`.
impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = ApplicationError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Caller>()
            .cloned()
            .ok_or(ApplicationError::Unauthorized)
    }
}
