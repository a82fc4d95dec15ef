//! Common test utilities for integration tests.
//!
//! Record fixtures, feed bodies and helpers for waiting on controller
//! publications.
//!
//! # Example
//!
//! ```ignore
//! use common::{site, wait_for_state};
//!
//! let record = site("Banqiao", "New Taipei", "16");
//! let state = wait_for_state(&controller, |s| !s.is_error()).await;
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use smogwatch::models::Record;
use smogwatch::view_state::{InfoStateController, ListState};
use std::time::Duration;

/// Upper bound for any single wait in these tests.
pub const WAIT_LIMIT: Duration = Duration::from_secs(5);

/// A record with just the fields the partition and search look at.
pub fn site(name: &str, county: &str, pm25: &str) -> Record {
    Record {
        site_name: name.to_string(),
        county: county.to_string(),
        pm25: pm25.to_string(),
        status: "Moderate".to_string(),
        ..Default::default()
    }
}

/// A feed body in the platform's envelope shape.
///
/// Five sites: two high, two low (one exactly on the threshold) and one with
/// no PM2.5 reading.
pub fn sample_feed_json() -> String {
    serde_json::json!({
        "fields": [{"id": "sitename"}, {"id": "pm2.5"}],
        "records": [
            {"sitename": "Banqiao", "county": "New Taipei", "pm2.5": "16", "aqi": "52", "status": "Moderate", "publishtime": "2024/03/01 10:00:00"},
            {"sitename": "Zuoying", "county": "Kaohsiung", "pm2.5": 35, "aqi": "98", "status": "Moderate", "publishtime": "2024/03/01 10:00:00"},
            {"sitename": "Hualien", "county": "Hualien", "pm2.5": "4", "aqi": "21", "status": "Good", "publishtime": "2024/03/01 10:00:00"},
            {"sitename": "Keelung", "county": "Keelung", "pm2.5": "10", "aqi": "33", "status": "Good", "publishtime": "2024/03/01 10:00:00"},
            {"sitename": "Matsu", "county": "Lienchiang", "pm2.5": "", "aqi": "", "status": "", "publishtime": "2024/03/01 10:00:00"}
        ]
    })
    .to_string()
}

/// Site names of `records`, in order.
pub fn names(records: &[Record]) -> Vec<&str> {
    records.iter().map(|r| r.site_name.as_str()).collect()
}

/// Wait until the controller's state satisfies `pred`, failing the test after
/// [`WAIT_LIMIT`].
pub async fn wait_for_state<F>(controller: &InfoStateController, pred: F) -> ListState
where
    F: FnMut(&ListState) -> bool,
{
    let mut states = controller.subscribe_state();
    tokio::time::timeout(WAIT_LIMIT, states.wait_for(pred))
        .await
        .expect("Timed out waiting for list state")
        .expect("State publisher dropped")
}

/// Wait until a refresh has settled on a state other than `Refreshing`.
pub async fn settled(controller: &InfoStateController) -> ListState {
    wait_for_state(controller, |s| *s != ListState::Refreshing).await
}
