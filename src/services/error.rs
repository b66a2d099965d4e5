use thiserror::Error;

use crate::application::error::ApplicationError;

#[derive(Debug, Error)]
pub enum DataStoreError {
    #[error("Video data not found: {0}")]
    NotFound(u64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    #[error("Storage provider error: {0}")]
    ProviderError(String),
}

impl From<DataStoreError> for ApplicationError {
    fn from(error: DataStoreError) -> Self {
        match error {
            DataStoreError::NotFound(_) => ApplicationError::NotFound,
            // stream copy failures surface as client errors, never retried
            DataStoreError::Io(e) => ApplicationError::BadRequest(format!("Video data I/O: {}", e)),
            DataStoreError::InvalidCredentials(msg) | DataStoreError::ProviderError(msg) => {
                ApplicationError::InternalError(format!("Storage error: {}", msg))
            }
        }
    }
}
