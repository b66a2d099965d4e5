mod adapters;
mod application;
mod domain;
mod services;

use std::sync::Arc;

use adapters::{
    repositories::{MemoryVideoRepository, PgVideoRepository, VideoCatalog},
    router::{like_router, upload_router},
    state::{LikeState, ServerInfo, UploadState},
};
use application::{repositories::video_repository::VideoRepository, services::CallerAuthenticator};
use axum::{http::HeaderValue, Router};
use domain::config::{
    local::{LocalConfig, ServiceKind},
    secrets::Secrets,
};
use services::JwtCallerAuthenticator;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Install the rustls crypto provider before any S3 client is built
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    let local_config = LocalConfig::from_env().expect("ERROR: invalid service configuration");
    let secrets = Secrets::from_env().expect("ERROR: invalid secrets configuration");

    tracing::info!(
        "Starting video-svc ({:?}) as {}",
        local_config.service_kind,
        local_config.server_name
    );

    let router = match local_config.service_kind {
        ServiceKind::Upload => build_upload_service(&local_config, &secrets).await,
        ServiceKind::Like => build_like_service(&local_config, &secrets).await,
    };

    let router = router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&local_config));

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", local_config.port))
        .await
        .expect("Failed to bind to port");

    tracing::info!("Server listening on 0.0.0.0:{}", local_config.port);

    axum::serve(listener, router)
        .await
        .expect("Failed to start server");
}

async fn build_upload_service(local_config: &LocalConfig, secrets: &Secrets) -> Router {
    let data_store =
        services::create_data_store(&local_config.provider, &local_config.data_dir, secrets)
            .await
            .expect("Failed to create video data store");

    tracing::info!("Video data provider: {}", data_store.provider());

    upload_router(UploadState {
        server: server_info(local_config, data_store.provider()),
        catalog: Arc::new(VideoCatalog::new()),
        data_store,
    })
}

async fn build_like_service(local_config: &LocalConfig, secrets: &Secrets) -> Router {
    let jwt_secret = secrets
        .jwt_secret
        .as_deref()
        .expect("ERROR: JWT_SECRET environment variable must be set for the like service");
    let authenticator =
        Arc::new(JwtCallerAuthenticator::new(jwt_secret)) as Arc<dyn CallerAuthenticator>;

    let (video_repository, backend) = match secrets.database_url.as_deref() {
        Some(database_url) => {
            tracing::info!("Connecting to database...");
            let pool = sqlx::postgres::PgPoolOptions::new()
                .max_connections(5)
                .acquire_timeout(std::time::Duration::from_secs(30))
                .connect(database_url)
                .await
                .expect("ERROR: Failed to connect to PostgreSQL database. Check DATABASE_URL and network connectivity.");

            let repository = PgVideoRepository::new(pool);
            repository
                .ensure_schema()
                .await
                .expect("Failed to prepare video table");
            tracing::info!("Database connection established");

            (Arc::new(repository) as Arc<dyn VideoRepository>, "postgres")
        }
        None => {
            tracing::warn!("DATABASE_URL not set, videos are kept in memory only");
            (
                Arc::new(MemoryVideoRepository::new()) as Arc<dyn VideoRepository>,
                "memory",
            )
        }
    };

    like_router(LikeState {
        server: server_info(local_config, backend),
        video_repository,
        authenticator,
    })
}

fn server_info(local_config: &LocalConfig, backend: &str) -> ServerInfo {
    ServerInfo {
        service_kind: local_config.service_kind,
        server_name: local_config.server_name.clone(),
        server_url: local_config.server_url.clone(),
        backend: backend.to_string(),
        max_upload_size: local_config.max_upload_size,
    }
}

fn cors_layer(local_config: &LocalConfig) -> CorsLayer {
    match &local_config.cors_allowed_origins {
        Some(allowed_origins) => {
            let origins: Vec<HeaderValue> = allowed_origins
                .iter()
                .map(|s| s.parse().expect("Invalid CORS origin"))
                .collect();
            CorsLayer::new()
                .allow_origin(origins)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        // Allow all origins if not specified (only for development)
        None => CorsLayer::permissive(),
    }
}
