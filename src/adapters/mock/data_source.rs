//! Scripted data source for controller tests.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::Notify;

use crate::error::FetchError;
use crate::traits::{DataSource, PollutedInfo};

/// One scripted answer to `fetch_polluted_info`.
#[derive(Debug, Clone)]
pub enum MockFetch {
    /// Answer immediately.
    Respond(Result<PollutedInfo, FetchError>),
    /// Answer after sleeping.
    Delayed(Duration, Result<PollutedInfo, FetchError>),
    /// Answer once the gate is notified.
    Gated(Arc<Notify>, Result<PollutedInfo, FetchError>),
    /// Never answer.
    Pending,
}

/// Data source that replays queued answers in order, then falls back to a
/// default answer.
#[derive(Debug, Clone)]
pub struct MockDataSource {
    script: Arc<Mutex<VecDeque<MockFetch>>>,
    fallback: Arc<Mutex<MockFetch>>,
    fetches: Arc<AtomicUsize>,
}

impl MockDataSource {
    /// Every fetch succeeds with `info`.
    pub fn returning(info: PollutedInfo) -> Self {
        Self::with_fallback(MockFetch::Respond(Ok(info)))
    }

    /// Every fetch fails with `err`.
    pub fn failing(err: FetchError) -> Self {
        Self::with_fallback(MockFetch::Respond(Err(err)))
    }

    pub fn with_fallback(fallback: MockFetch) -> Self {
        Self {
            script: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Arc::new(Mutex::new(fallback)),
            fetches: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Queue an answer used before the fallback.
    pub fn push(&self, fetch: MockFetch) -> &Self {
        self.script.lock().unwrap().push_back(fetch);
        self
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }

    fn next_answer(&self) -> MockFetch {
        let queued = self.script.lock().unwrap().pop_front();
        queued.unwrap_or_else(|| self.fallback.lock().unwrap().clone())
    }
}

#[async_trait]
impl DataSource for MockDataSource {
    async fn fetch_polluted_info(&self) -> Result<PollutedInfo, FetchError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        match self.next_answer() {
            MockFetch::Respond(result) => result,
            MockFetch::Delayed(delay, result) => {
                tokio::time::sleep(delay).await;
                result
            }
            MockFetch::Gated(gate, result) => {
                gate.notified().await;
                result
            }
            MockFetch::Pending => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Record;

    fn info(name: &str) -> PollutedInfo {
        let record = Record {
            site_name: name.to_string(),
            ..Default::default()
        };
        PollutedInfo::new(vec![record], Vec::new())
    }

    #[tokio::test]
    async fn test_script_then_fallback() {
        let source = MockDataSource::returning(info("fallback"));
        source.push(MockFetch::Respond(Err(FetchError::Cancelled)));

        assert_eq!(source.fetch_polluted_info().await, Err(FetchError::Cancelled));
        assert_eq!(source.fetch_polluted_info().await, Ok(info("fallback")));
        assert_eq!(source.fetch_polluted_info().await, Ok(info("fallback")));
        assert_eq!(source.fetch_count(), 3);
    }

    #[tokio::test]
    async fn test_gated_waits_for_notify() {
        let gate = Arc::new(Notify::new());
        let source = MockDataSource::failing(FetchError::Cancelled);
        source.push(MockFetch::Gated(gate.clone(), Ok(info("gated"))));

        let task = tokio::spawn({
            let source = source.clone();
            async move { source.fetch_polluted_info().await }
        });
        gate.notify_one();
        assert_eq!(task.await.unwrap(), Ok(info("gated")));
    }
}
