use std::path::PathBuf;

use async_trait::async_trait;
use tempfile::{NamedTempFile, TempPath};
use tokio::{
    fs::File,
    io::{AsyncRead, AsyncWriteExt, BufWriter},
};
use tracing::{debug, info, warn};

use crate::{
    application::{
        error::ApplicationError,
        services::{DataReader, VideoDataStore},
    },
    services::error::DataStoreError,
};

/// Stores each payload as `video{id}.mpg` under a root directory.
///
/// Every save streams into its own temporary file next to the target and is
/// renamed over it once complete, so overlapping uploads to one id never
/// share a file and the last completed upload wins.
pub struct LocalVideoDataStore {
    root: PathBuf,
}

impl LocalVideoDataStore {
    pub async fn new(root: impl Into<PathBuf>) -> Result<Self, DataStoreError> {
        let root = root.into();
        tokio::fs::create_dir_all(&root).await?;
        info!("Local video data directory ready at {:?}", root);
        Ok(Self { root })
    }

    fn data_path(&self, video_id: u64) -> PathBuf {
        self.root.join(format!("video{}.mpg", video_id))
    }

    /// Streams `reader` into a fresh temp file. The file is removed when the
    /// returned path is dropped without being persisted.
    async fn write_partial(
        &self,
        video_id: u64,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<(TempPath, u64), DataStoreError> {
        let (file, path) = tempfile::Builder::new()
            .prefix(&format!("video{}.", video_id))
            .suffix(".part")
            .tempfile_in(&self.root)
            .map(NamedTempFile::into_parts)?;

        let mut file = BufWriter::new(File::from_std(file));
        let written = tokio::io::copy(reader, &mut file).await?;
        file.flush().await?;
        file.into_inner().sync_all().await?;
        Ok((path, written))
    }
}

#[async_trait]
impl VideoDataStore for LocalVideoDataStore {
    async fn save(
        &self,
        video_id: u64,
        reader: &mut (dyn AsyncRead + Send + Unpin),
    ) -> Result<u64, ApplicationError> {
        // the previous payload stays in place until the new one is complete
        let (partial, written) = match self.write_partial(video_id, reader).await {
            Ok(done) => done,
            Err(e) => {
                warn!("Failed to write data for video {}: {}", video_id, e);
                return Err(e.into());
            }
        };

        partial
            .persist(self.data_path(video_id))
            .map_err(|e| DataStoreError::Io(e.error))?;

        debug!("Stored {} bytes for video {}", written, video_id);
        Ok(written)
    }

    async fn open(&self, video_id: u64) -> Result<DataReader, ApplicationError> {
        match File::open(self.data_path(video_id)).await {
            Ok(file) => Ok(Box::pin(file)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(DataStoreError::NotFound(video_id).into())
            }
            Err(e) => Err(DataStoreError::from(e).into()),
        }
    }

    fn provider(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Bytes;
    use std::{io, path::Path, sync::Arc};
    use tempfile::tempdir;
    use tokio::io::AsyncReadExt;
    use tokio_util::io::StreamReader;

    async fn read_stored(store: &LocalVideoDataStore, video_id: u64) -> Vec<u8> {
        let mut stored = Vec::new();
        store
            .open(video_id)
            .await
            .unwrap()
            .read_to_end(&mut stored)
            .await
            .unwrap();
        stored
    }

    fn file_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_save_then_open_returns_same_bytes() {
        let dir = tempdir().unwrap();
        let store = LocalVideoDataStore::new(dir.path()).await.unwrap();

        let payload = b"\x00\x01\x02video-bytes".to_vec();
        let mut reader = std::io::Cursor::new(payload.clone());
        let written = store.save(3, &mut reader).await.unwrap();
        assert_eq!(written, payload.len() as u64);

        let mut stored = Vec::new();
        store
            .open(3)
            .await
            .unwrap()
            .read_to_end(&mut stored)
            .await
            .unwrap();
        assert_eq!(stored, payload);
        assert_eq!(file_names(dir.path()), vec!["video3.mpg".to_string()]);
    }

    #[tokio::test]
    async fn test_open_unknown_video_is_not_found() {
        let dir = tempdir().unwrap();
        let store = LocalVideoDataStore::new(dir.path()).await.unwrap();

        let result = store.open(42).await;
        assert!(matches!(result, Err(ApplicationError::NotFound)));
    }

    #[tokio::test]
    async fn test_save_replaces_previous_payload() {
        let dir = tempdir().unwrap();
        let store = LocalVideoDataStore::new(dir.path().join("nested")).await.unwrap();

        store
            .save(1, &mut std::io::Cursor::new(b"first upload".to_vec()))
            .await
            .unwrap();
        store
            .save(1, &mut std::io::Cursor::new(b"second".to_vec()))
            .await
            .unwrap();

        let mut stored = Vec::new();
        store
            .open(1)
            .await
            .unwrap()
            .read_to_end(&mut stored)
            .await
            .unwrap();
        assert_eq!(stored, b"second");
    }

    #[tokio::test]
    async fn test_failed_stream_keeps_previous_payload() {
        let dir = tempdir().unwrap();
        let store = LocalVideoDataStore::new(dir.path()).await.unwrap();

        store
            .save(5, &mut std::io::Cursor::new(b"complete payload".to_vec()))
            .await
            .unwrap();

        let chunks: Vec<io::Result<Bytes>> = vec![
            Ok(Bytes::from_static(b"half of a new")),
            Err(io::Error::other("connection reset")),
        ];
        let mut broken = StreamReader::new(futures::stream::iter(chunks));

        let result = store.save(5, &mut broken).await;
        assert!(matches!(result, Err(ApplicationError::BadRequest(_))));

        assert_eq!(read_stored(&store, 5).await, b"complete payload");
        assert_eq!(file_names(dir.path()), vec!["video5.mpg".to_string()]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_overlapping_saves_store_one_whole_payload() {
        let dir = tempdir().unwrap();
        let store = Arc::new(LocalVideoDataStore::new(dir.path()).await.unwrap());

        let first = vec![b'A'; 200 * 1024];
        let second = vec![b'B'; 100 * 1024];

        for _ in 0..20 {
            let a = {
                let store = store.clone();
                let payload = first.clone();
                tokio::spawn(async move { store.save(9, &mut std::io::Cursor::new(payload)).await })
            };
            let b = {
                let store = store.clone();
                let payload = second.clone();
                tokio::spawn(async move { store.save(9, &mut std::io::Cursor::new(payload)).await })
            };

            assert!(a.await.unwrap().is_ok());
            assert!(b.await.unwrap().is_ok());

            let stored = read_stored(&store, 9).await;
            assert!(stored == first || stored == second);
        }

        assert_eq!(file_names(dir.path()), vec!["video9.mpg".to_string()]);
    }
}
