use serde::{Deserialize, Serialize};

use crate::domain::models::video::VideoState;

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct VideoStatusResponse {
    pub state: VideoState,
}

#[derive(Debug, Deserialize)]
pub struct TitleQuery {
    pub title: String,
}

#[derive(Debug, Deserialize)]
pub struct DurationQuery {
    pub duration: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
