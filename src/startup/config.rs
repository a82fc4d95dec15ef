//! Application configuration.
//!
//! Layering, lowest to highest priority:
//!
//! 1. built-in defaults
//! 2. JSON file (`~/.config/smogwatch/config.json` or `--config <path>`)
//! 3. `SMOGWATCH_*` environment variables

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::adapters::DEFAULT_SYSFS_NET_ROOT;
use crate::error::ConfigError;
use crate::repository::{DEFAULT_API_URL, DEFAULT_HIGH_THRESHOLD, DEFAULT_RECORD_LIMIT};

pub const ENV_API_URL: &str = "SMOGWATCH_API_URL";
pub const ENV_API_KEY: &str = "SMOGWATCH_API_KEY";
pub const ENV_THRESHOLD: &str = "SMOGWATCH_THRESHOLD";
pub const ENV_TIMEOUT_SECS: &str = "SMOGWATCH_TIMEOUT_SECS";
pub const ENV_LIMIT: &str = "SMOGWATCH_LIMIT";
pub const ENV_NET_ROOT: &str = "SMOGWATCH_NET_ROOT";

/// Default fetch time budget in seconds.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration.
///
/// # Example
///
/// ```ignore
/// use smogwatch::startup::AppConfig;
///
/// let config = AppConfig::default()
///     .with_api_key("my-key")
///     .with_high_threshold(35.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// AQI dataset endpoint
    pub api_url: String,
    /// Open data platform API key
    pub api_key: Option<String>,
    /// PM2.5 level above which a site is listed as high
    pub high_threshold: f64,
    /// Time budget for one fetch
    pub fetch_timeout_secs: u64,
    /// Maximum records requested per fetch
    pub record_limit: u32,
    /// Network interface status directory used by the connectivity probe
    pub net_root: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: None,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            record_limit: DEFAULT_RECORD_LIMIT,
            net_root: PathBuf::from(DEFAULT_SYSFS_NET_ROOT),
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_high_threshold(mut self, threshold: f64) -> Self {
        self.high_threshold = threshold;
        self
    }

    pub fn with_fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.fetch_timeout_secs = secs;
        self
    }

    pub fn with_record_limit(mut self, limit: u32) -> Self {
        self.record_limit = limit;
        self
    }

    pub fn with_net_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.net_root = root.into();
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// `~/.config/smogwatch/config.json` (platform equivalent elsewhere).
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("smogwatch").join("config.json"))
    }

    /// Read a JSON config file. Missing keys keep their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply `SMOGWATCH_*` variables from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from any key lookup. Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(ENV_API_URL) {
            self.api_url = url;
        }
        if let Some(key) = get(ENV_API_KEY) {
            self.api_key = Some(key);
        }
        if let Some(raw) = get(ENV_THRESHOLD) {
            self.high_threshold = raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid(ENV_THRESHOLD, format!("'{}' is not a number", raw)))?;
        }
        if let Some(raw) = get(ENV_TIMEOUT_SECS) {
            self.fetch_timeout_secs = raw.trim().parse().map_err(|_| {
                ConfigError::invalid(ENV_TIMEOUT_SECS, format!("'{}' is not a whole number", raw))
            })?;
        }
        if let Some(raw) = get(ENV_LIMIT) {
            self.record_limit = raw.trim().parse().map_err(|_| {
                ConfigError::invalid(ENV_LIMIT, format!("'{}' is not a whole number", raw))
            })?;
        }
        if let Some(root) = get(ENV_NET_ROOT) {
            self.net_root = PathBuf::from(root);
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        reqwest::Url::parse(&self.api_url)
            .map_err(|e| ConfigError::invalid("api_url", format!("{}: {}", self.api_url, e)))?;
        if !self.high_threshold.is_finite() || self.high_threshold < 0.0 {
            return Err(ConfigError::invalid(
                "high_threshold",
                format!("{} must be a non-negative number", self.high_threshold),
            ));
        }
        if self.fetch_timeout_secs == 0 {
            return Err(ConfigError::invalid("fetch_timeout_secs", "must be at least 1"));
        }
        if self.record_limit == 0 {
            return Err(ConfigError::invalid("record_limit", "must be at least 1"));
        }
        Ok(())
    }

    /// Build the effective configuration.
    ///
    /// An explicit `path` must exist; the default location is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(default_path) => {
                    tracing::debug!("Loading config from {:?}", default_path);
                    Self::load_from_file(&default_path)?
                }
                None => Self::default(),
            },
        };
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }
}
