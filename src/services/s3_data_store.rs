use async_trait::async_trait;
use aws_sdk_s3::{
    config::{BehaviorVersion, Credentials, Region},
    primitives::ByteStream,
    Client,
};
use tempfile::NamedTempFile;
use tokio::{
    fs::File,
    io::{AsyncRead, AsyncWriteExt, BufWriter},
};
use tracing::{debug, info};

use crate::{
    application::{
        error::ApplicationError,
        services::{DataReader, VideoDataStore},
    },
    domain::config::secrets::S3Secrets,
    services::error::DataStoreError,
};

/// Stores payloads as `videos/video{id}.mpg` objects in an S3-compatible bucket.
pub struct S3VideoDataStore {
    client: Client,
    bucket_name: String,
}

impl S3VideoDataStore {
    pub fn new(secrets: S3Secrets) -> Result<Self, DataStoreError> {
        if secrets.access_key_id.is_empty() || secrets.secret_access_key.is_empty() {
            return Err(DataStoreError::InvalidCredentials(
                "S3 access key and secret must not be empty".to_string(),
            ));
        }

        let credentials = Credentials::new(
            secrets.access_key_id,
            secrets.secret_access_key,
            None,
            None,
            "video-svc",
        );

        let config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .endpoint_url(secrets.endpoint.trim_end_matches('/'))
            .region(Region::new(secrets.region))
            .credentials_provider(credentials)
            .force_path_style(true)
            .build();

        info!("S3 video data store configured for bucket {}", secrets.bucket_name);

        Ok(Self {
            client: Client::from_conf(config),
            bucket_name: secrets.bucket_name,
        })
    }

    fn object_key(video_id: u64) -> String {
        format!("videos/video{}.mpg", video_id)
    }
}

#[async_trait]
impl VideoDataStore for S3VideoDataStore {
    async fn save(
        &self,
        video_id: u64,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<u64, ApplicationError> {
        // spool to disk so the object length is known without holding the body in memory
        let (file, spool) = NamedTempFile::new()
            .map(NamedTempFile::into_parts)
            .map_err(DataStoreError::from)?;
        let mut file = BufWriter::new(File::from_std(file));
        let written = tokio::io::copy(reader, &mut file)
            .await
            .map_err(DataStoreError::from)?;
        file.flush().await.map_err(DataStoreError::from)?;

        let body = ByteStream::from_path(&spool)
            .await
            .map_err(|e| DataStoreError::ProviderError(format!("Cannot read spooled upload: {}", e)))?;

        self.client
            .put_object()
            .bucket(&self.bucket_name)
            .key(Self::object_key(video_id))
            .content_length(written as i64)
            .body(body)
            .send()
            .await
            .map_err(|e| DataStoreError::ProviderError(format!("Upload failed: {}", e)))?;

        debug!("Uploaded {} bytes for video {} to S3", written, video_id);
        Ok(written)
    }

    async fn open(&self, video_id: u64) -> Result<DataReader, ApplicationError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket_name)
            .key(Self::object_key(video_id))
            .send()
            .await
            .map_err(|e| {
                if e.as_service_error().is_some_and(|se| se.is_no_such_key()) {
                    DataStoreError::NotFound(video_id)
                } else {
                    DataStoreError::ProviderError(format!("Download failed: {}", e))
                }
            })?;

        Ok(Box::pin(output.body.into_async_read()))
    }

    fn provider(&self) -> &'static str {
        "s3"
    }
}
