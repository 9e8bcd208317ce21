//! Core module: exam records, grade computation and persistence

pub mod aggregator;
pub mod config;
pub mod error;
pub mod input;
pub mod models;
pub mod report;
pub mod session;
pub mod store;

/// Returns the current version of the `Libretto` crate
#[must_use]
pub const fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
