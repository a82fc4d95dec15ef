//! HTTP client trait abstraction.
//!
//! The AQI repository only ever issues GET requests, so the seam is a single
//! method. Production code uses [`ReqwestHttpClient`](crate::adapters::ReqwestHttpClient),
//! tests use [`MockHttpClient`](crate::adapters::mock::MockHttpClient).

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;

/// HTTP headers represented as a key-value map.
pub type Headers = HashMap<String, String>;

/// HTTP response wrapper.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: Headers,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: u16, body: Bytes) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body,
        }
    }

    pub fn with_headers(status: u16, headers: Headers, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> Result<String, std::string::FromUtf8Error> {
        String::from_utf8(self.body.to_vec())
    }

    /// Parse the response body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// HTTP client errors.
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Invalid URL
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Trait for HTTP client operations.
///
/// # Example
///
/// ```ignore
/// use smogwatch::traits::{HttpClient, Headers};
///
/// async fn fetch_body<C: HttpClient>(client: &C) -> Option<String> {
///     let response = client.get("https://aqi.example/api", &Headers::new()).await.ok()?;
///     response.text().ok()
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Perform a GET request. Non-2xx statuses are returned as a `Response`,
    /// not as an error.
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError>;
}
