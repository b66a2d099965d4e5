use axum::extract::FromRef;
use std::sync::Arc;

use crate::{
    adapters::repositories::VideoCatalog,
    application::{
        repositories::video_repository::VideoRepository,
        services::{CallerAuthenticator, VideoDataStore},
    },
    domain::config::local::ServiceKind,
};

/// Static facts about the running instance, shared by both services.
#[derive(Clone, Debug)]
pub struct ServerInfo {
    pub service_kind: ServiceKind,
    pub server_name: String,
    pub server_url: String,
    pub backend: String,
    pub max_upload_size: usize,
}

#[derive(Clone, FromRef)]
pub struct UploadState {
    pub server: ServerInfo,
    pub catalog: Arc<VideoCatalog>,
    pub data_store: Arc<dyn VideoDataStore>,
}

#[derive(Clone, FromRef)]
pub struct LikeState {
    pub server: ServerInfo,
    pub video_repository: Arc<dyn VideoRepository>,
    pub authenticator: Arc<dyn CallerAuthenticator>,
}
