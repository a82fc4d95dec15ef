//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`MockConnectivity`] - switchable online/offline probe
//! - [`MockDataSource`] - scripted fetch results, delays and gates

pub mod connectivity;
pub mod data_source;
pub mod http;

pub use connectivity::MockConnectivity;
pub use data_source::{MockDataSource, MockFetch};
pub use http::{MockHttpClient, MockResponse};
