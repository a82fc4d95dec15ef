use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading [`AppConfig`](crate::startup::AppConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A setting was present but unusable.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

impl ConfigError {
    pub fn invalid(key: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ConfigError::Read { .. } => "E_CFG_READ",
            ConfigError::Parse { .. } => "E_CFG_PARSE",
            ConfigError::InvalidValue { .. } => "E_CFG_VALUE",
        }
    }
}
