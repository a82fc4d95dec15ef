//! Concrete implementations of the trait abstractions in `crate::traits`.
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`SysfsConnectivityProbe`] - network status from `/sys/class/net`
//!
//! The [`mock`] submodule provides test doubles for every trait.

pub mod mock;
pub mod reqwest_http;
pub mod sysfs_probe;

pub use mock::{MockConnectivity, MockDataSource, MockHttpClient};
pub use reqwest_http::ReqwestHttpClient;
pub use sysfs_probe::{SysfsConnectivityProbe, DEFAULT_SYSFS_NET_ROOT};
