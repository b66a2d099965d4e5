use serde::{Deserialize, Serialize};

use crate::domain::config::error::ConfigError;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_DIR: &str = "videos";
const DEFAULT_MAX_UPLOAD_SIZE: usize = 100 * 1024 * 1024;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum ServiceKind {
    #[serde(rename = "upload")]
    Upload,
    #[serde(rename = "like")]
    Like,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub enum Provider {
    #[serde(rename = "local")]
    Local,
    #[serde(rename = "s3")]
    S3,
    #[serde(rename = "memory")]
    Memory,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LocalConfig {
    #[serde(rename = "serviceKind")]
    pub service_kind: ServiceKind,
    pub port: u16,
    #[serde(rename = "serverName")]
    pub server_name: String,
    #[serde(rename = "serverUrl")]
    pub server_url: String,
    pub provider: Provider,
    #[serde(rename = "dataDir")]
    pub data_dir: String,
    #[serde(rename = "maxUploadSize")]
    pub max_upload_size: usize,
    #[serde(rename = "corsAllowedOrigins")]
    pub cors_allowed_origins: Option<Vec<String>>,
}

impl LocalConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let service_kind = match lookup("SERVICE_KIND").as_deref() {
            Some("upload") => ServiceKind::Upload,
            Some("like") => ServiceKind::Like,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "SERVICE_KIND",
                    value: other.to_string(),
                })
            }
            None => return Err(ConfigError::Missing("SERVICE_KIND")),
        };

        let port = match lookup("PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value,
            })?,
            None => DEFAULT_PORT,
        };

        let provider = match lookup("DATA_PROVIDER").as_deref() {
            None | Some("local") => Provider::Local,
            Some("s3") => Provider::S3,
            Some("memory") => Provider::Memory,
            Some(other) => {
                return Err(ConfigError::Invalid {
                    var: "DATA_PROVIDER",
                    value: other.to_string(),
                })
            }
        };

        let max_upload_size = match lookup("MAX_UPLOAD_SIZE") {
            Some(value) => value.parse::<usize>().map_err(|_| ConfigError::Invalid {
                var: "MAX_UPLOAD_SIZE",
                value,
            })?,
            None => DEFAULT_MAX_UPLOAD_SIZE,
        };

        let cors_allowed_origins = lookup("CORS_ALLOWED_ORIGINS").map(|origins| {
            origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        });

        Ok(Self {
            service_kind,
            port,
            server_name: lookup("SERVER_NAME").unwrap_or_else(|| "video-svc".to_string()),
            server_url: lookup("SERVER_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| format!("http://localhost:{}", port)),
            provider,
            data_dir: lookup("DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()),
            max_upload_size,
            cors_allowed_origins,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_only_service_kind_is_set() {
        let config = LocalConfig::from_lookup(lookup_from(&[("SERVICE_KIND", "upload")])).unwrap();

        assert_eq!(config.service_kind, ServiceKind::Upload);
        assert_eq!(config.port, 8080);
        assert_eq!(config.provider, Provider::Local);
        assert_eq!(config.data_dir, "videos");
        assert_eq!(config.server_url, "http://localhost:8080");
        assert_eq!(config.max_upload_size, 100 * 1024 * 1024);
        assert!(config.cors_allowed_origins.is_none());
    }

    #[test]
    fn service_kind_is_required() {
        let err = LocalConfig::from_lookup(lookup_from(&[])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SERVICE_KIND"));
    }

    #[test]
    fn rejects_unknown_provider_and_bad_port() {
        let err = LocalConfig::from_lookup(lookup_from(&[
            ("SERVICE_KIND", "like"),
            ("DATA_PROVIDER", "ftp"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "DATA_PROVIDER", .. }));

        let err = LocalConfig::from_lookup(lookup_from(&[
            ("SERVICE_KIND", "like"),
            ("PORT", "http"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { var: "PORT", .. }));
    }

    #[test]
    fn parses_origins_and_trims_server_url() {
        let config = LocalConfig::from_lookup(lookup_from(&[
            ("SERVICE_KIND", "like"),
            ("SERVER_URL", "https://videos.example.com/"),
            ("CORS_ALLOWED_ORIGINS", "https://a.example.com, https://b.example.com,"),
        ]))
        .unwrap();

        assert_eq!(config.server_url, "https://videos.example.com");
        assert_eq!(
            config.cors_allowed_origins,
            Some(vec![
                "https://a.example.com".to_string(),
                "https://b.example.com".to_string()
            ])
        );
    }
}
