use crate::{application::error::ApplicationError, domain::models::caller::Caller};

/// Resolves the caller behind a bearer credential. Token issuance lives elsewhere.
pub trait CallerAuthenticator: Send + Sync {
    fn authenticate(&self, bearer_token: &str) -> Result<Caller, ApplicationError>;
}
