//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP GET used by the AQI repository
//! - [`ConnectivityProbe`] - host network status
//! - [`DataSource`] - categorised pollution records

pub mod connectivity;
pub mod data_source;
pub mod http;

pub use connectivity::ConnectivityProbe;
pub use data_source::{DataSource, PollutedInfo};
pub use http::{Headers, HttpClient, HttpError, Response};
