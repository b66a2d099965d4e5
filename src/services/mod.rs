mod error;
mod jwt_authenticator;
mod local_data_store;
mod memory_data_store;
mod s3_data_store;

pub use error::DataStoreError;
pub use jwt_authenticator::JwtCallerAuthenticator;
pub use local_data_store::LocalVideoDataStore;
pub use memory_data_store::MemoryVideoDataStore;
pub use s3_data_store::S3VideoDataStore;

#[cfg(test)]
pub(crate) use jwt_authenticator::tests as jwt_test_support;

use std::sync::Arc;

use crate::{
    application::services::VideoDataStore,
    domain::config::{local::Provider, secrets::Secrets},
};

pub async fn create_data_store(
    provider: &Provider,
    data_dir: &str,
    secrets: &Secrets,
) -> Result<Arc<dyn VideoDataStore>, DataStoreError> {
    match provider {
        Provider::Local => {
            let service = LocalVideoDataStore::new(data_dir).await?;
            Ok(Arc::new(service))
        }
        Provider::S3 => {
            let s3_secrets = secrets.s3_secrets.as_ref().ok_or_else(|| {
                DataStoreError::InvalidCredentials("S3 secrets not found".to_string())
            })?;

            let service = S3VideoDataStore::new(s3_secrets.clone())?;
            Ok(Arc::new(service))
        }
        Provider::Memory => Ok(Arc::new(MemoryVideoDataStore::new())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn s3_provider_without_secrets_is_rejected() {
        let result = create_data_store(&Provider::S3, "unused", &Secrets::default()).await;
        assert!(matches!(result, Err(DataStoreError::InvalidCredentials(_))));
    }

    #[tokio::test]
    async fn local_provider_creates_its_directory() {
        let dir = tempdir().unwrap();
        let data_dir = dir.path().join("videos");

        let store = create_data_store(&Provider::Local, data_dir.to_str().unwrap(), &Secrets::default())
            .await
            .unwrap();

        assert_eq!(store.provider(), "local");
        assert!(data_dir.is_dir());
    }
}
