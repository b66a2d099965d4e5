use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum VideoState {
    #[default]
    Processing,
    Ready,
}

/// Video record held by the upload service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UploadVideo {
    #[serde(default)]
    pub id: u64,
    pub title: String,
    pub duration: u64,
    #[serde(rename = "contentType")]
    pub content_type: String,
    #[serde(rename = "dataUrl", default)]
    pub data_url: String,
    #[serde(skip)]
    pub state: VideoState,
}

impl UploadVideo {
    pub fn has_data(&self) -> bool {
        self.state == VideoState::Ready
    }
}
