//! Smogwatch - air quality readings from the national AQI feed, split into
//! high and low PM2.5 lists, with a small state machine driving the display.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod cli;
pub mod cli_output;
pub mod error;
pub mod models;
pub mod repository;
pub mod search;
pub mod startup;
pub mod traits;
pub mod view_state;
