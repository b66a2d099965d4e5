use std::pin::Pin;

use async_trait::async_trait;
use tokio::io::AsyncRead;

use crate::application::error::ApplicationError;

pub type DataReader = Pin<Box<dyn AsyncRead + Send>>;

/// Binary payload storage addressed by video id.
#[async_trait]
pub trait VideoDataStore: Send + Sync {
    /// Copies `reader` to the blob for `video_id`, replacing any previous one.
    /// Returns the number of bytes written.
    async fn save(
        &self,
        video_id: u64,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<u64, ApplicationError>;

    async fn open(&self, video_id: u64) -> Result<DataReader, ApplicationError>;

    fn provider(&self) -> &'static str;
}
