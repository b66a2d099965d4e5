use async_trait::async_trait;

use crate::{
    application::error::ApplicationError,
    domain::models::like_video::{LikeVideo, MAX_STORED_VALUE},
};

#[async_trait]
pub trait VideoRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<LikeVideo>, ApplicationError>;
    async fn find_one(&self, id: u64) -> Result<Option<LikeVideo>, ApplicationError>;
    /// Inserts the video when its id is 0, otherwise replaces the stored record.
    /// Ids and durations above [`MAX_STORED_VALUE`] are rejected.
    async fn save(&self, video: LikeVideo) -> Result<LikeVideo, ApplicationError>;
    async fn find_by_name(&self, name: &str) -> Result<Vec<LikeVideo>, ApplicationError>;
    async fn find_by_duration_less_than(
        &self,
        duration: u64,
    ) -> Result<Vec<LikeVideo>, ApplicationError>;
}

/// Rejects a record whose id or duration no repository can keep unchanged.
pub fn ensure_storable(video: &LikeVideo) -> Result<(), ApplicationError> {
    match video.out_of_range_field() {
        Some(field) => Err(ApplicationError::BadRequest(format!(
            "Video {} must not exceed {}",
            field, MAX_STORED_VALUE
        ))),
        None => Ok(()),
    }
}
