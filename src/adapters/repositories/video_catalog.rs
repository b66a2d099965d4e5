use std::{collections::BTreeMap, sync::Mutex};

use tracing::debug;

use crate::domain::models::video::{UploadVideo, VideoState};

#[derive(Default)]
struct CatalogInner {
    videos: BTreeMap<u64, UploadVideo>,
    last_id: u64,
}

/// In-memory video metadata for the upload service. Every operation runs under
/// one lock, so id assignment and insertion are atomic with respect to each other.
#[derive(Default)]
pub struct VideoCatalog {
    inner: Mutex<CatalogInner>,
}

impl VideoCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list(&self) -> Vec<UploadVideo> {
        self.inner.lock().unwrap().videos.values().cloned().collect()
    }

    pub fn get(&self, id: u64) -> Option<UploadVideo> {
        self.inner.lock().unwrap().videos.get(&id).cloned()
    }

    /// Stores `video`, assigning the next free id when its id is 0. `data_url`
    /// receives the final id and builds the record's download URL.
    pub fn create<F>(&self, mut video: UploadVideo, data_url: F) -> UploadVideo
    where
        F: FnOnce(u64) -> String,
    {
        let mut inner = self.inner.lock().unwrap();

        if video.id == 0 {
            // skip ids claimed explicitly by earlier requests
            loop {
                inner.last_id += 1;
                if !inner.videos.contains_key(&inner.last_id) {
                    break;
                }
            }
            video.id = inner.last_id;
        }

        video.data_url = data_url(video.id);
        video.state = inner
            .videos
            .get(&video.id)
            .map(|existing| existing.state)
            .unwrap_or(VideoState::Processing);

        debug!("Cataloguing video {} ({})", video.id, video.title);
        inner.videos.insert(video.id, video.clone());
        video
    }

    /// Marks the video's payload as present. Returns `None` for unknown ids.
    pub fn mark_ready(&self, id: u64) -> Option<UploadVideo> {
        let mut inner = self.inner.lock().unwrap();
        let video = inner.videos.get_mut(&id)?;
        video.state = VideoState::Ready;
        Some(video.clone())
    }
}
