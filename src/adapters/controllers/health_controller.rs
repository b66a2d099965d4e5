use axum::{extract::State, Json};
use serde::Serialize;
use sysinfo::System;
use tracing::info;

use crate::{adapters::state::ServerInfo, domain::config::local::ServiceKind};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(rename = "serviceKind")]
    pub service_kind: ServiceKind,
    #[serde(rename = "serverName")]
    pub server_name: String,
    #[serde(rename = "serverUrl")]
    pub server_url: String,
    pub backend: String,
    #[serde(rename = "maxUploadSize")]
    pub max_upload_size: usize,
    pub metrics: SystemMetrics,
}

#[derive(Debug, Serialize)]
pub struct SystemMetrics {
    #[serde(rename = "cpuUsagePercent")]
    pub cpu_usage_percent: f32,
    #[serde(rename = "memoryUsedBytes")]
    pub memory_used_bytes: u64,
    #[serde(rename = "memoryTotalBytes")]
    pub memory_total_bytes: u64,
    #[serde(rename = "memoryUsagePercent")]
    pub memory_usage_percent: f32,
}

pub struct HealthController;

impl HealthController {
    /// GET /health
    pub async fn health_check(State(server): State<ServerInfo>) -> Json<HealthResponse> {
        info!("Health check requested");

        let mut sys = System::new();
        sys.refresh_cpu_usage();
        sys.refresh_memory();

        let memory_used = sys.used_memory();
        let memory_total = sys.total_memory();
        let memory_usage_percent = if memory_total > 0 {
            (memory_used as f32 / memory_total as f32) * 100.0
        } else {
            0.0
        };

        let metrics = SystemMetrics {
            cpu_usage_percent: sys.global_cpu_usage(),
            memory_used_bytes: memory_used,
            memory_total_bytes: memory_total,
            memory_usage_percent,
        };

        Json(HealthResponse {
            status: "healthy".to_string(),
            service_kind: server.service_kind,
            server_name: server.server_name,
            server_url: server.server_url,
            backend: server.backend,
            max_upload_size: server.max_upload_size,
            metrics,
        })
    }
}
