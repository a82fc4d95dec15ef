//! Tracing subscriber initialization.
//!
//! Logs go to stderr so they never mix with the record listing on stdout.
//! `RUST_LOG` wins over the verbosity flag when set.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "smogwatch=info";
/// Filter used with `--verbose` when `RUST_LOG` is unset.
pub const VERBOSE_FILTER: &str = "smogwatch=debug";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Tracing subscriber already initialized")]
    AlreadyInitialized,
}

/// Pick the filter directive: `RUST_LOG` if present, else the default for
/// the requested verbosity.
pub fn filter_directive(rust_log: Option<&str>, verbose: bool) -> String {
    match rust_log.map(str::trim).filter(|s| !s.is_empty()) {
        Some(directive) => directive.to_string(),
        None if verbose => VERBOSE_FILTER.to_string(),
        None => DEFAULT_FILTER.to_string(),
    }
}

/// Install the global subscriber.
pub fn init(verbose: bool) -> Result<(), LoggingError> {
    let rust_log = std::env::var("RUST_LOG").ok();
    let directive = filter_directive(rust_log.as_deref(), verbose);
    let env_filter = EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::AlreadyInitialized)
}
