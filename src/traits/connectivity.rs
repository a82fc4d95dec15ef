//! Connectivity probe abstraction.

use async_trait::async_trait;

/// Answers "is the device online right now?" without transferring any data.
///
/// There is no failure mode: a probe that cannot reach its platform facility
/// reports `false`.
#[async_trait]
pub trait ConnectivityProbe: Send + Sync {
    async fn is_online(&self) -> bool;
}
