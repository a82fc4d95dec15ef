//! Reqwest-based HTTP client adapter.

use async_trait::async_trait;
use std::time::Duration;

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// HTTP client implementation using reqwest.
///
/// # Example
///
/// ```ignore
/// use smogwatch::adapters::ReqwestHttpClient;
///
/// let client = ReqwestHttpClient::with_timeout(Duration::from_secs(30))?;
/// let response = client.get("https://aqi.example/api", &Headers::new()).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReqwestHttpClient {
    client: reqwest::Client,
}

impl ReqwestHttpClient {
    /// Create a client with reqwest defaults (no request timeout).
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Create a client whose requests fail with [`HttpError::Timeout`] after
    /// `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self, HttpError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("smogwatch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| HttpError::Other(e.to_string()))?;
        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn convert_error(err: reqwest::Error) -> HttpError {
        if err.is_timeout() {
            HttpError::Timeout(err.to_string())
        } else if err.is_connect() {
            HttpError::ConnectionFailed(err.to_string())
        } else if err.is_builder() {
            HttpError::InvalidUrl(err.to_string())
        } else {
            HttpError::Other(err.to_string())
        }
    }

    fn convert_headers(headers: &reqwest::header::HeaderMap) -> Headers {
        headers
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.to_string(), v.to_string()))
            })
            .collect()
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        let mut builder = self.client.get(url);
        for (key, value) in headers {
            builder = builder.header(key, value);
        }

        let response = builder.send().await.map_err(Self::convert_error)?;

        let status = response.status().as_u16();
        let response_headers = Self::convert_headers(response.headers());
        let body = response.bytes().await.map_err(Self::convert_error)?;

        Ok(Response::with_headers(status, response_headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_timeout_builds() {
        assert!(ReqwestHttpClient::with_timeout(Duration::from_secs(5)).is_ok());
    }

    #[tokio::test]
    async fn test_invalid_url_is_error() {
        let client = ReqwestHttpClient::new();
        let result = client.get("not a url", &Headers::new()).await;
        assert!(result.is_err());
    }
}
