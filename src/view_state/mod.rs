//! View state for the pollution list.
//!
//! ```text
//! ┌──────────────────────┐    ┌──────────────┐
//! │ ConnectivityProbe    │    │  DataSource  │
//! └──────────┬───────────┘    └──────┬───────┘
//!            └──────────┬────────────┘
//!                       ▼
//!            ┌──────────────────────┐
//!            │ InfoStateController  │ refresh() / filter()
//!            └──────────┬───────────┘
//!          ┌────────────┼────────────┐
//!          ▼            ▼            ▼
//!     high records  low records  ListState     (LatestPublisher)
//!          │            │            │
//!          └────────────┴────────────┘
//!                       ▼
//!                display layer                 (Subscription)
//! ```
//!
//! ## Components
//!
//! - [`ListState`]: what the list currently shows
//! - [`LatestPublisher`] / [`Subscription`]: single-slot latest-value streams
//! - [`InfoStateController`]: owns the streams and runs refresh/filter

mod controller;
mod list_state;
mod publisher;

pub use controller::{ControllerConfig, InfoStateController, PublishCounts, PublishStamps};
pub use list_state::ListState;
pub use publisher::{LatestPublisher, PublishClock, Subscription};
