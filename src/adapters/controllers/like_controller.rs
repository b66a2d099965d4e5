use std::{collections::BTreeSet, sync::Arc};

use axum::{extract::State, Json};
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::video_dto::{DurationQuery, MessageResponse, TitleQuery},
        extract::{ApiJson, ApiPath, ApiQuery},
    },
    application::{error::ApplicationError, repositories::video_repository::VideoRepository},
    domain::models::{caller::Caller, like_video::LikeVideo},
};

pub struct LikeController;

impl LikeController {
    pub async fn list_videos(
        State(video_repo): State<Arc<dyn VideoRepository>>,
    ) -> Result<Json<Vec<LikeVideo>>, ApplicationError> {
        let videos = video_repo.find_all().await?;
        Ok(Json(videos))
    }

    pub async fn get_video(
        State(video_repo): State<Arc<dyn VideoRepository>>,
        ApiPath(id): ApiPath<u64>,
    ) -> Result<Json<LikeVideo>, ApplicationError> {
        let video = find_video(video_repo.as_ref(), id).await?;
        Ok(Json(video))
    }

    pub async fn create_video(
        State(video_repo): State<Arc<dyn VideoRepository>>,
        ApiJson(body): ApiJson<LikeVideo>,
    ) -> Result<Json<LikeVideo>, ApplicationError> {
        let video = video_repo.save(body).await?;
        info!("Created video {} ({})", video.id, video.name);
        Ok(Json(video))
    }

    /// POST /video/{id}/like
    pub async fn like_video(
        State(video_repo): State<Arc<dyn VideoRepository>>,
        ApiPath(id): ApiPath<u64>,
        caller: Caller,
    ) -> Result<Json<MessageResponse>, ApplicationError> {
        let mut video = find_video(video_repo.as_ref(), id).await?;

        if !video.like(&caller.name) {
            warn!("{} already likes video {}", caller.name, id);
            return Err(ApplicationError::BadRequest(
                "You have already liked this video".to_string(),
            ));
        }

        video_repo.save(video).await?;
        info!("{} liked video {}", caller.name, id);
        Ok(Json(MessageResponse::new("Video liked")))
    }

    /// POST /video/{id}/unlike
    pub async fn unlike_video(
        State(video_repo): State<Arc<dyn VideoRepository>>,
        ApiPath(id): ApiPath<u64>,
        caller: Caller,
    ) -> Result<Json<MessageResponse>, ApplicationError> {
        let mut video = find_video(video_repo.as_ref(), id).await?;

        if !video.unlike(&caller.name) {
            warn!("{} has not liked video {}", caller.name, id);
            return Err(ApplicationError::BadRequest(
                "You haven't liked this video".to_string(),
            ));
        }

        video_repo.save(video).await?;
        info!("{} unliked video {}", caller.name, id);
        Ok(Json(MessageResponse::new("Video unliked")))
    }

    /// GET /video/{id}/likedby
    pub async fn get_likers(
        State(video_repo): State<Arc<dyn VideoRepository>>,
        ApiPath(id): ApiPath<u64>,
    ) -> Result<Json<BTreeSet<String>>, ApplicationError> {
        let video = find_video(video_repo.as_ref(), id).await?;
        Ok(Json(video.liked_by))
    }

    /// GET /video/search/findByName?title=
    pub async fn find_by_title(
        State(video_repo): State<Arc<dyn VideoRepository>>,
        ApiQuery(query): ApiQuery<TitleQuery>,
    ) -> Result<Json<Vec<LikeVideo>>, ApplicationError> {
        let videos = video_repo.find_by_name(&query.title).await?;
        Ok(Json(videos))
    }

    /// GET /video/search/findByDurationLessThan?duration=
    pub async fn find_by_duration_less_than(
        State(video_repo): State<Arc<dyn VideoRepository>>,
        ApiQuery(query): ApiQuery<DurationQuery>,
    ) -> Result<Json<Vec<LikeVideo>>, ApplicationError> {
        let videos = video_repo
            .find_by_duration_less_than(query.duration)
            .await?;
        Ok(Json(videos))
    }
}

async fn find_video(video_repo: &dyn VideoRepository, id: u64) -> Result<LikeVideo, ApplicationError> {
    video_repo.find_one(id).await?.ok_or_else(|| {
        warn!("Video {} not found", id);
        ApplicationError::NotFound
    })
}
