//! Data source abstraction for categorised pollution records.

use async_trait::async_trait;

use crate::error::FetchError;
use crate::models::Record;

/// Records split into the two display groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollutedInfo {
    /// Sites above the PM2.5 threshold.
    pub high: Vec<Record>,
    /// Sites at or below the threshold.
    pub low: Vec<Record>,
}

impl PollutedInfo {
    pub fn new(high: Vec<Record>, low: Vec<Record>) -> Self {
        Self { high, low }
    }

    pub fn len(&self) -> usize {
        self.high.len() + self.low.len()
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty() && self.low.is_empty()
    }
}

/// Provides pollution records split into high and low groups.
///
/// Implementations report an exceeded time budget as
/// [`FetchError::Timeout`]; the controller shows that as its own state.
#[async_trait]
pub trait DataSource: Send + Sync {
    async fn fetch_polluted_info(&self) -> Result<PollutedInfo, FetchError>;
}
