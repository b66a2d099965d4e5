use std::{collections::HashMap, io::Cursor, sync::RwLock};

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::{
    application::{
        error::ApplicationError,
        services::{DataReader, VideoDataStore},
    },
    services::error::DataStoreError,
};

#[derive(Default)]
pub struct MemoryVideoDataStore {
    blobs: RwLock<HashMap<u64, Vec<u8>>>,
}

impl MemoryVideoDataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VideoDataStore for MemoryVideoDataStore {
    async fn save(
        &self,
        video_id: u64,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<u64, ApplicationError> {
        let mut content = Vec::new();
        reader
            .read_to_end(&mut content)
            .await
            .map_err(DataStoreError::from)?;

        let written = content.len() as u64;
        self.blobs.write().unwrap().insert(video_id, content);
        Ok(written)
    }

    async fn open(&self, video_id: u64) -> Result<DataReader, ApplicationError> {
        let content = self
            .blobs
            .read()
            .unwrap()
            .get(&video_id)
            .cloned()
            .ok_or(DataStoreError::NotFound(video_id))?;

        Ok(Box::pin(Cursor::new(content)))
    }

    fn provider(&self) -> &'static str {
        "memory"
    }
}
