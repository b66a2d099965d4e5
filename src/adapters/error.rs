use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::application::error::ApplicationError;

impl IntoResponse for ApplicationError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApplicationError::NotFound => {
                warn!("Resource not found");
                (StatusCode::NOT_FOUND, "Resource not found".to_string())
            }
            ApplicationError::BadRequest(msg) => {
                warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, msg)
            }
            ApplicationError::Unauthorized => {
                warn!("Unauthorized access attempt");
                (StatusCode::UNAUTHORIZED, "Unauthorized".to_string())
            }
            ApplicationError::PayloadTooLarge => {
                warn!("Video data too large");
                (StatusCode::PAYLOAD_TOO_LARGE, "Video data too large".to_string())
            }
            ApplicationError::InternalError(ref msg) => {
                error!("Internal server error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
            ApplicationError::DatabaseError(ref msg) => {
                error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for ApplicationError {
    fn from(rejection: JsonRejection) -> Self {
        ApplicationError::BadRequest(format!("Invalid request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for ApplicationError {
    fn from(rejection: PathRejection) -> Self {
        ApplicationError::BadRequest(format!("Invalid path: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for ApplicationError {
    fn from(rejection: QueryRejection) -> Self {
        ApplicationError::BadRequest(format!("Invalid query: {}", rejection.body_text()))
    }
}

impl From<MultipartRejection> for ApplicationError {
    fn from(rejection: MultipartRejection) -> Self {
        ApplicationError::BadRequest(format!("Invalid request format: {}", rejection.body_text()))
    }
}
