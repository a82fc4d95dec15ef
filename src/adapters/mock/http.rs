//! Mock HTTP client for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{Headers, HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub url: String,
    pub headers: Headers,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    Success(Response),
    Error(HttpError),
}

/// Mock HTTP client returning canned responses by URL.
///
/// Lookup order: exact URL, then the first configured prefix, then the
/// default response.
///
/// ```ignore
/// let client = MockHttpClient::new();
/// client.set_response(
///     "https://aqi.example/api",
///     MockResponse::Success(Response::new(200, Bytes::from("[]"))),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    default_response: Arc<Mutex<Option<MockResponse>>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();

        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }

        for (pattern, response) in responses.iter() {
            if url.starts_with(pattern) {
                return Some(response.clone());
            }
        }

        let default = self.default_response.lock().unwrap();
        default.clone()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str, headers: &Headers) -> Result<Response, HttpError> {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
        });

        match self.get_response(url) {
            Some(MockResponse::Success(response)) => Ok(response),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    #[tokio::test]
    async fn test_prefix_match_and_recording() {
        let client = MockHttpClient::new();
        client.set_response(
            "https://aqi.example/api",
            MockResponse::Success(Response::new(200, Bytes::from("[]"))),
        );

        let response = client
            .get("https://aqi.example/api?format=json", &Headers::new())
            .await
            .unwrap();
        assert_eq!(response.status, 200);

        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "https://aqi.example/api?format=json");
    }

    #[tokio::test]
    async fn test_unconfigured_url_errors() {
        let client = MockHttpClient::new();
        let result = client.get("https://nowhere.example", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_default_response() {
        let client = MockHttpClient::new();
        client.set_default_response(MockResponse::Error(HttpError::Timeout("slow".to_string())));
        let result = client.get("https://any.example", &Headers::new()).await;
        assert!(matches!(result, Err(HttpError::Timeout(_))));
    }
}
