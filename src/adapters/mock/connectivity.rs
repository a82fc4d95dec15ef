use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::traits::ConnectivityProbe;

/// Switchable connectivity probe.
#[derive(Debug, Clone)]
pub struct MockConnectivity {
    online: Arc<AtomicBool>,
    queries: Arc<AtomicUsize>,
}

impl MockConnectivity {
    pub fn online() -> Self {
        Self::with_state(true)
    }

    pub fn offline() -> Self {
        Self::with_state(false)
    }

    fn with_state(online: bool) -> Self {
        Self {
            online: Arc::new(AtomicBool::new(online)),
            queries: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Flip the reported state (simulates the network going up or down).
    pub fn set_online(&self, online: bool) {
        self.online.store(online, Ordering::SeqCst);
    }

    /// Number of times `is_online` was called.
    pub fn query_count(&self) -> usize {
        self.queries.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConnectivityProbe for MockConnectivity {
    async fn is_online(&self) -> bool {
        self.queries.fetch_add(1, Ordering::SeqCst);
        self.online.load(Ordering::SeqCst)
    }
}
