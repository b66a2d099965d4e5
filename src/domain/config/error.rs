use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),

    #[error("invalid value '{value}' for {var}")]
    Invalid { var: &'static str, value: String },
}
