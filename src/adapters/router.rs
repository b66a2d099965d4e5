use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::adapters::{
    controllers::{
        health_controller::HealthController, like_controller::LikeController,
        upload_controller::UploadController,
    },
    middleware::authenticate_caller,
    state::{LikeState, UploadState},
};

pub fn upload_router(app_state: UploadState) -> Router {
    let max_upload_size = app_state.server.max_upload_size;

    Router::new()
        .route("/health", get(HealthController::health_check))
        .route(
            "/video",
            get(UploadController::list_videos).post(UploadController::create_video),
        )
        .route(
            "/video/{id}/data",
            get(UploadController::download_data).post(UploadController::upload_data),
        )
        .layer(DefaultBodyLimit::max(max_upload_size))
        .with_state(app_state)
}

pub fn like_router(app_state: LikeState) -> Router {
    // every video route needs a resolved caller
    let video_routes = Router::new()
        .route(
            "/video",
            get(LikeController::list_videos).post(LikeController::create_video),
        )
        .route("/video/{id}", get(LikeController::get_video))
        .route("/video/{id}/like", post(LikeController::like_video))
        .route("/video/{id}/unlike", post(LikeController::unlike_video))
        .route("/video/{id}/likedby", get(LikeController::get_likers))
        .route(
            "/video/search/findByName",
            get(LikeController::find_by_title),
        )
        .route(
            "/video/search/findByDurationLessThan",
            get(LikeController::find_by_duration_less_than),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            authenticate_caller,
        ));

    Router::new()
        .route("/health", get(HealthController::health_check))
        .merge(video_routes)
        .with_state(app_state)
}
