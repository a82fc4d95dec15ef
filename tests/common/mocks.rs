//! Mock wiring for test fixtures.
//!
//! Re-exports the mocks from `smogwatch::adapters::mock` and adds builders
//! for the HTTP responses the AQI repository expects.

pub use smogwatch::adapters::mock::{
    MockConnectivity, MockDataSource, MockFetch, MockHttpClient, MockResponse,
};
pub use smogwatch::traits::{HttpError, Response};

use bytes::Bytes;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Every request gets `status` with `body`.
    pub fn with_default_response(self, status: u16, body: &str) -> Self {
        self.client
            .set_default_response(MockResponse::Success(Response::new(
                status,
                Bytes::from(body.to_string()),
            )));
        self
    }

    /// Every request fails at the transport level.
    pub fn with_default_error(self, error: HttpError) -> Self {
        self.client.set_default_response(MockResponse::Error(error));
        self
    }

    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
