use std::{io, sync::Arc};

use axum::{
    body::Body,
    extract::{multipart::MultipartError, State},
    http::{header, HeaderMap, StatusCode},
    response::Response,
    Json,
};
use futures::TryStreamExt;
use tokio_util::io::{ReaderStream, StreamReader};
use tracing::{info, warn};

use crate::{
    adapters::{
        dto::video_dto::VideoStatusResponse,
        extract::{ApiJson, ApiMultipart, ApiPath},
        repositories::VideoCatalog,
        state::ServerInfo,
    },
    application::{error::ApplicationError, services::VideoDataStore},
    domain::models::video::{UploadVideo, VideoState},
};

const DATA_PARAMETER: &str = "data";

pub struct UploadController;

impl UploadController {
    /// GET /video
    pub async fn list_videos(State(catalog): State<Arc<VideoCatalog>>) -> Json<Vec<UploadVideo>> {
        Json(catalog.list())
    }

    /// POST /video
    pub async fn create_video(
        State(catalog): State<Arc<VideoCatalog>>,
        State(server): State<ServerInfo>,
        headers: HeaderMap,
        ApiJson(body): ApiJson<UploadVideo>,
    ) -> Json<UploadVideo> {
        let base_url = request_base_url(&headers, &server.server_url);
        let video = catalog.create(body, |id| format!("{}/video/{}/data", base_url, id));

        info!("Created video {} with data URL {}", video.id, video.data_url);
        Json(video)
    }

    /// POST /video/{id}/data, multipart field `data`
    pub async fn upload_data(
        State(catalog): State<Arc<VideoCatalog>>,
        State(data_store): State<Arc<dyn VideoDataStore>>,
        State(server): State<ServerInfo>,
        ApiPath(id): ApiPath<u64>,
        headers: HeaderMap,
        ApiMultipart(mut multipart): ApiMultipart,
    ) -> Result<Json<VideoStatusResponse>, ApplicationError> {
        if id == 0 || catalog.get(id).is_none() {
            warn!("Upload rejected for unknown video {}", id);
            return Err(ApplicationError::NotFound);
        }

        let declared_length = headers
            .get(header::CONTENT_LENGTH)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<usize>().ok());
        if declared_length.is_some_and(|len| len > server.max_upload_size) {
            return Err(ApplicationError::PayloadTooLarge);
        }

        while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
            if field.name() != Some(DATA_PARAMETER) {
                continue;
            }

            let reader = StreamReader::new(field.map_err(io::Error::other));
            futures::pin_mut!(reader);

            let written = data_store.save(id, &mut reader).await?;

            catalog
                .mark_ready(id)
                .ok_or(ApplicationError::NotFound)?;

            info!("Stored {} bytes of data for video {}", written, id);
            return Ok(Json(VideoStatusResponse {
                state: VideoState::Ready,
            }));
        }

        warn!("Upload for video {} has no '{}' field", id, DATA_PARAMETER);
        Err(ApplicationError::BadRequest(format!(
            "Missing required '{}' field",
            DATA_PARAMETER
        )))
    }

    /// GET /video/{id}/data
    pub async fn download_data(
        State(catalog): State<Arc<VideoCatalog>>,
        State(data_store): State<Arc<dyn VideoDataStore>>,
        ApiPath(id): ApiPath<u64>,
    ) -> Result<Response, ApplicationError> {
        let video = catalog
            .get(id)
            .filter(|video| video.id != 0)
            .ok_or(ApplicationError::NotFound)?;

        if !video.has_data() {
            warn!("Video {} has no data yet", id);
            return Err(ApplicationError::NotFound);
        }

        let reader = data_store.open(id).await?;

        Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, video.content_type)
            .body(Body::from_stream(ReaderStream::new(reader)))
            .map_err(|e| ApplicationError::InternalError(e.to_string()))
    }
}

/// `http://host[:port]` of the current request, falling back to the configured URL.
fn request_base_url(headers: &HeaderMap, fallback: &str) -> String {
    headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .filter(|host| !host.is_empty())
        .map(|host| format!("http://{}", host))
        .unwrap_or_else(|| fallback.to_string())
}

fn multipart_error(e: MultipartError) -> ApplicationError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApplicationError::PayloadTooLarge;
    }
    warn!("Invalid multipart data: {}", e);
    ApplicationError::BadRequest("Invalid request format".to_string())
}
