//! Core module for the academic tracker

pub mod config;
pub mod metrics;
pub mod models;
pub mod mutations;
pub mod report;
pub mod schedule;
pub mod store;

/// Returns the current version of the `academic-navigator` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
