//! State controller for the pollution list.
//!
//! Owns three latest-value outputs (high records, low records, list state) and
//! two operations: [`refresh`](InfoStateController::refresh) and
//! [`filter`](InfoStateController::filter).
//!
//! ```text
//! refresh ──► probe.is_online()
//!               │ false ──► NoNetwork
//!               │ true
//!               ▼
//!            Refreshing ──► source.fetch_polluted_info()
//!                              │ Ok      ──► high, low, ShowAll
//!                              │ Timeout ──► Timeout
//!                              │ other   ──► Failed(message)
//! ```
//!
//! All work runs on a task scope tied to the controller: a
//! [`CancellationToken`] cancelled by [`shutdown`](InfoStateController::shutdown)
//! or on drop. Values published before cancellation stay visible.
//!
//! Overlapping refreshes are cancel-and-restart: a new refresh cancels the one
//! in flight, and refresh bodies never run concurrently, so the publication
//! sequences of two refreshes cannot interleave.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use super::list_state::ListState;
use super::publisher::{LatestPublisher, PublishClock, Subscription};
use crate::error::FetchError;
use crate::models::Record;
use crate::traits::{ConnectivityProbe, DataSource, PollutedInfo};

/// Options for [`InfoStateController`].
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Time budget for one fetch; `None` leaves it to the data source.
    pub fetch_timeout: Option<Duration>,
    /// Start a refresh during construction (default: true).
    pub refresh_on_start: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout: None,
            refresh_on_start: true,
        }
    }
}

impl ControllerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = Some(timeout);
        self
    }

    pub fn with_refresh_on_start(mut self, refresh: bool) -> Self {
        self.refresh_on_start = refresh;
        self
    }
}

/// Publication counters, mostly useful in tests and debug logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishCounts {
    pub state: u64,
    pub high: u64,
    pub low: u64,
}

/// Clock stamps of the latest publication on each output, `None` before the
/// first. All three share one clock, so comparing stamps gives the order in
/// which the outputs were last written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishStamps {
    pub state: Option<u64>,
    pub high: Option<u64>,
    pub low: Option<u64>,
}

struct Inner {
    probe: Arc<dyn ConnectivityProbe>,
    source: Arc<dyn DataSource>,
    high: LatestPublisher<Vec<Record>>,
    low: LatestPublisher<Vec<Record>>,
    state: LatestPublisher<ListState>,
    fetch_timeout: Option<Duration>,
    scope: CancellationToken,
    in_flight: Mutex<Option<CancellationToken>>,
    refresh_lock: tokio::sync::Mutex<()>,
}

impl Inner {
    fn publish_state(&self, state: ListState) {
        debug!(state = %state, "Publishing list state");
        self.state.publish(state);
    }

    async fn run_refresh(&self) {
        let _serial = self.refresh_lock.lock().await;

        if !self.probe.is_online().await {
            info!("No network connectivity, skipping fetch");
            self.publish_state(ListState::NoNetwork);
            return;
        }

        self.publish_state(ListState::Refreshing);

        match self.fetch().await {
            Ok(info) => {
                info!(
                    high = info.high.len(),
                    low = info.low.len(),
                    "Refresh complete"
                );
                self.high.publish(info.high);
                self.low.publish(info.low);
                self.publish_state(ListState::ShowAll);
            }
            Err(err) if err.is_timeout() => {
                warn!(error_code = err.error_code(), "Fetch timed out: {}", err);
                self.publish_state(ListState::Timeout);
            }
            Err(err) => {
                error!(
                    error_code = err.error_code(),
                    retryable = err.is_retryable(),
                    "Fetch failed: {}",
                    err
                );
                self.publish_state(ListState::Failed(err.user_message()));
            }
        }
    }

    async fn fetch(&self) -> Result<PollutedInfo, FetchError> {
        let fetch = self.source.fetch_polluted_info();
        match self.fetch_timeout {
            Some(budget) => tokio::time::timeout(budget, fetch)
                .await
                .unwrap_or_else(|_| Err(FetchError::timeout("fetch_polluted_info", budget))),
            None => fetch.await,
        }
    }
}

/// Presentation-layer controller for pollution records.
///
/// Must be created inside a Tokio runtime.
///
/// # Example
///
/// ```ignore
/// let controller = InfoStateController::new(Arc::new(probe), Arc::new(repository));
/// let mut states = controller.subscribe_state();
/// while let Some(state) = states.next().await {
///     println!("{}", state);
/// }
/// ```
pub struct InfoStateController {
    inner: Arc<Inner>,
}

impl InfoStateController {
    /// Create a controller and start the initial refresh.
    pub fn new(probe: Arc<dyn ConnectivityProbe>, source: Arc<dyn DataSource>) -> Self {
        Self::with_config(probe, source, ControllerConfig::default())
    }

    pub fn with_config(
        probe: Arc<dyn ConnectivityProbe>,
        source: Arc<dyn DataSource>,
        config: ControllerConfig,
    ) -> Self {
        let clock = PublishClock::new();
        let controller = Self {
            inner: Arc::new(Inner {
                probe,
                source,
                high: LatestPublisher::new().with_clock(clock.clone()),
                low: LatestPublisher::new().with_clock(clock.clone()),
                state: LatestPublisher::with_initial(ListState::Refreshing).with_clock(clock),
                fetch_timeout: config.fetch_timeout,
                scope: CancellationToken::new(),
                in_flight: Mutex::new(None),
                refresh_lock: tokio::sync::Mutex::new(()),
            }),
        };

        if config.refresh_on_start {
            controller.refresh();
        }
        controller
    }

    /// Start a refresh on the controller's task scope.
    ///
    /// Cancels any refresh still in flight. The returned handle completes when
    /// this refresh has published its last value or was cancelled; dropping
    /// it does not cancel anything.
    pub fn refresh(&self) -> JoinHandle<()> {
        let token = self.inner.scope.child_token();
        let previous = self
            .inner
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(token.clone());
        if let Some(previous) = previous {
            if !previous.is_cancelled() {
                debug!("Cancelling superseded refresh");
                previous.cancel();
            }
        }

        let inner = self.inner.clone();
        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    debug!("Refresh cancelled");
                }
                _ = inner.run_refresh() => {}
            }
        })
    }

    /// Publish the state for a filter interaction and return it.
    ///
    /// `item_count` is the number of records the display's keyword search
    /// matched. After [`shutdown`](Self::shutdown) the state is still computed
    /// and returned but not published.
    ///
    /// Runs inline on the caller and is not ordered against a refresh in
    /// flight: a filter issued between that refresh's `Refreshing` and its
    /// final state is overwritten by the final state (`ShowAll` on success),
    /// so a display keeping a keyword should drop it when it sees `ShowAll`.
    pub fn filter(&self, expanded: bool, item_count: usize, keyword: &str) -> ListState {
        let state = ListState::for_filter(expanded, item_count, keyword);
        if self.inner.scope.is_cancelled() {
            debug!(state = %state, "Controller shut down, filter result not published");
            return state;
        }
        self.inner.publish_state(state.clone());
        state
    }

    /// Cancel the task scope. In-flight refreshes stop at their next
    /// suspension point; later calls publish nothing.
    pub fn shutdown(&self) {
        if !self.inner.scope.is_cancelled() {
            info!("Shutting down state controller");
            self.inner.scope.cancel();
        }
    }

    pub fn is_shut_down(&self) -> bool {
        self.inner.scope.is_cancelled()
    }

    /// Current list state.
    pub fn state(&self) -> ListState {
        self.inner.state.latest().unwrap_or_default()
    }

    pub fn high_records(&self) -> Option<Vec<Record>> {
        self.inner.high.latest()
    }

    pub fn low_records(&self) -> Option<Vec<Record>> {
        self.inner.low.latest()
    }

    pub fn subscribe_state(&self) -> Subscription<ListState> {
        self.inner.state.subscribe()
    }

    pub fn subscribe_high(&self) -> Subscription<Vec<Record>> {
        self.inner.high.subscribe()
    }

    pub fn subscribe_low(&self) -> Subscription<Vec<Record>> {
        self.inner.low.subscribe()
    }

    pub fn publish_stamps(&self) -> PublishStamps {
        PublishStamps {
            state: self.inner.state.last_stamp(),
            high: self.inner.high.last_stamp(),
            low: self.inner.low.last_stamp(),
        }
    }

    pub fn publish_counts(&self) -> PublishCounts {
        PublishCounts {
            state: self.inner.state.publish_count(),
            high: self.inner.high.publish_count(),
            low: self.inner.low.publish_count(),
        }
    }
}

impl Drop for InfoStateController {
    fn drop(&mut self) {
        self.shutdown();
    }
}
