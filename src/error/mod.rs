//! Error types for smogwatch.
//!
//! - **Fetch errors**: everything a data source can fail with. The state
//!   controller maps each one onto a `ListState`.
//! - **Config errors**: reading and validating `AppConfig`.
//!
//! | Fetch error | ListState | Retryable |
//! |-------------|-----------|-----------|
//! | Timeout | Timeout | Yes |
//! | ConnectionFailed | Failed | Yes |
//! | HttpStatus | Failed | 5xx/408/429 |
//! | InvalidResponse | Failed | No |
//! | Cancelled | Failed | No |
//! | Other | Failed | No |

mod config;
mod fetch;

pub use config::ConfigError;
pub use fetch::{classify_http_error, FetchError};
