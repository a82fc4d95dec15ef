//! Startup: configuration loading, logging and wiring of the controller.
//!
//! # Components
//!
//! - [`config`] - layered `AppConfig`
//! - [`logging`] - tracing subscriber setup
//!
//! # Usage
//!
//! ```ignore
//! use smogwatch::startup::{build_controller, AppConfig};
//!
//! let config = AppConfig::load(None)?;
//! let controller = build_controller(&config)?;
//! ```

pub mod config;
pub mod logging;

pub use config::AppConfig;
pub use logging::LoggingError;

use std::sync::Arc;

use crate::adapters::{ReqwestHttpClient, SysfsConnectivityProbe};
use crate::repository::AqiRepository;
use crate::traits::HttpError;
use crate::view_state::{ControllerConfig, InfoStateController};

/// Wire the production probe and repository into a controller.
///
/// Starts the initial refresh, so it must run inside a Tokio runtime.
pub fn build_controller(config: &AppConfig) -> Result<InfoStateController, HttpError> {
    let client = ReqwestHttpClient::with_timeout(config.fetch_timeout())?;
    let repository = AqiRepository::from_config(client, config);
    let probe = SysfsConnectivityProbe::new(config.net_root.clone());

    tracing::info!(
        api_url = %config.api_url,
        threshold = config.high_threshold,
        "Starting state controller"
    );

    Ok(InfoStateController::with_config(
        Arc::new(probe),
        Arc::new(repository),
        ControllerConfig::new().with_fetch_timeout(config.fetch_timeout()),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view_state::ListState;
    use std::time::Duration;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_build_controller_without_network_facility() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::default().with_net_root(dir.path().join("missing"));

        let controller = build_controller(&config).unwrap();
        let mut states = controller.subscribe_state();
        let state = tokio::time::timeout(
            Duration::from_secs(5),
            states.wait_for(|s| *s == ListState::NoNetwork),
        )
        .await
        .unwrap();
        assert_eq!(state, Some(ListState::NoNetwork));
    }
}
