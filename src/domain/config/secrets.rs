use serde::{Deserialize, Serialize};

use crate::domain::config::error::ConfigError;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct S3Secrets {
    #[serde(rename = "endpoint")]
    pub endpoint: String,
    #[serde(rename = "region")]
    pub region: String,
    #[serde(rename = "accessKeyId")]
    pub access_key_id: String,
    #[serde(rename = "secretAccessKey")]
    pub secret_access_key: String,
    #[serde(rename = "bucketName")]
    pub bucket_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct Secrets {
    #[serde(rename = "databaseUrl")]
    pub database_url: Option<String>,
    #[serde(rename = "jwtSecret")]
    pub jwt_secret: Option<String>,
    #[serde(rename = "s3Secrets")]
    pub s3_secrets: Option<S3Secrets>,
}

impl Secrets {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // S3 settings are all-or-nothing once an endpoint is given
        let s3_secrets = match lookup("S3_ENDPOINT") {
            Some(endpoint) => Some(S3Secrets {
                endpoint,
                region: lookup("S3_REGION").unwrap_or_else(|| "us-east-1".to_string()),
                access_key_id: lookup("S3_ACCESS_KEY_ID")
                    .ok_or(ConfigError::Missing("S3_ACCESS_KEY_ID"))?,
                secret_access_key: lookup("S3_SECRET_ACCESS_KEY")
                    .ok_or(ConfigError::Missing("S3_SECRET_ACCESS_KEY"))?,
                bucket_name: lookup("S3_BUCKET").ok_or(ConfigError::Missing("S3_BUCKET"))?,
            }),
            None => None,
        };

        Ok(Self {
            database_url: lookup("DATABASE_URL").filter(|url| !url.is_empty()),
            jwt_secret: lookup("JWT_SECRET").filter(|secret| !secret.is_empty()),
            s3_secrets,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s3_secrets_need_credentials_once_endpoint_is_set() {
        let err = Secrets::from_lookup(|key| match key {
            "S3_ENDPOINT" => Some("http://minio:9000".to_string()),
            _ => None,
        })
        .unwrap_err();

        assert_eq!(err, ConfigError::Missing("S3_ACCESS_KEY_ID"));
    }

    #[test]
    fn empty_values_are_treated_as_absent() {
        let secrets = Secrets::from_lookup(|key| match key {
            "DATABASE_URL" | "JWT_SECRET" => Some(String::new()),
            _ => None,
        })
        .unwrap();

        assert!(secrets.database_url.is_none());
        assert!(secrets.jwt_secret.is_none());
        assert!(secrets.s3_secrets.is_none());
    }
}
