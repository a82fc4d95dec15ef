//! Errors raised while fetching AQI records.
//!
//! `FetchError` is what a [`DataSource`](crate::traits::DataSource) returns.
//! The state controller turns every variant into a `ListState`, so nothing
//! here ever escapes the controller.

use std::time::Duration;

use thiserror::Error;

use crate::traits::HttpError;

/// Fetch-specific error variants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FetchError {
    /// The request or the whole fetch exceeded its time budget.
    #[error("{operation} timed out after {duration_secs} seconds")]
    Timeout {
        operation: String,
        duration_secs: u64,
    },

    /// Connection to the server failed.
    #[error("Connection failed to '{url}': {message}")]
    ConnectionFailed { url: String, message: String },

    /// HTTP status error (non-2xx response).
    #[error("HTTP {status} error: {message}")]
    HttpStatus { status: u16, message: String },

    /// Body could not be decoded into records.
    #[error("Invalid response: {message}")]
    InvalidResponse { message: String },

    /// The data source gave up before completing.
    #[error("Fetch cancelled")]
    Cancelled,

    /// Anything else.
    #[error("Fetch error: {message}")]
    Other { message: String },
}

impl FetchError {
    /// Timeout for `budget`, rounded up to whole seconds (at least 1).
    pub fn timeout(operation: impl Into<String>, budget: Duration) -> Self {
        let mut secs = budget.as_secs();
        if budget.subsec_nanos() > 0 {
            secs += 1;
        }
        FetchError::Timeout {
            operation: operation.into(),
            duration_secs: secs.max(1),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, FetchError::Timeout { .. })
    }

    /// Check if this error is likely transient.
    ///
    /// Nothing retries automatically; the CLI uses this to decide whether to
    /// suggest pressing `r`.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Timeout { .. } => true,
            FetchError::ConnectionFailed { .. } => true,
            FetchError::HttpStatus { status, .. } => {
                *status >= 500 || *status == 429 || *status == 408
            }
            FetchError::InvalidResponse { .. } => false,
            FetchError::Cancelled => false,
            FetchError::Other { .. } => false,
        }
    }

    /// Get a user-friendly error message.
    pub fn user_message(&self) -> String {
        match self {
            FetchError::Timeout { duration_secs, .. } => format!(
                "The air quality service did not answer within {} second{}.",
                duration_secs,
                if *duration_secs == 1 { "" } else { "s" }
            ),
            FetchError::ConnectionFailed { .. } => {
                "Unable to reach the air quality service. Please check your internet connection."
                    .to_string()
            }
            FetchError::HttpStatus { status, .. } => match *status {
                401 | 403 => "The air quality service rejected the API key.".to_string(),
                404 => "The air quality dataset was not found. Check the API URL.".to_string(),
                429 => "Too many requests. Please wait a moment and try again.".to_string(),
                500..=599 => {
                    "The air quality service is having problems. Please try again later."
                        .to_string()
                }
                _ => format!("The air quality service returned HTTP {}.", status),
            },
            FetchError::InvalidResponse { .. } => {
                "Received data in an unexpected format from the air quality service.".to_string()
            }
            FetchError::Cancelled => "The refresh was cancelled.".to_string(),
            FetchError::Other { message } => format!("Could not load readings: {}", message),
        }
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            FetchError::Timeout { .. } => "E_FETCH_TIMEOUT",
            FetchError::ConnectionFailed { .. } => "E_FETCH_CONN",
            FetchError::HttpStatus { .. } => "E_FETCH_HTTP",
            FetchError::InvalidResponse { .. } => "E_FETCH_INVALID",
            FetchError::Cancelled => "E_FETCH_CANCEL",
            FetchError::Other { .. } => "E_FETCH_OTHER",
        }
    }
}

/// Classify an adapter-level [`HttpError`] into a `FetchError`.
///
/// `budget` is the request timeout the caller configured; `HttpError::Timeout`
/// does not carry it.
pub fn classify_http_error(err: HttpError, url: &str, budget: Duration) -> FetchError {
    match err {
        HttpError::Timeout(_) => FetchError::timeout("AQI request", budget),
        HttpError::ConnectionFailed(message) => FetchError::ConnectionFailed {
            url: url.to_string(),
            message,
        },
        HttpError::InvalidUrl(message) => FetchError::Other {
            message: format!("invalid URL: {}", message),
        },
        HttpError::Other(message) => FetchError::Other { message },
    }
}
