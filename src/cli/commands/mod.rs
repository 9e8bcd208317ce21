//! CLI command handlers for `Libretto`.
//!
//! Each command family is implemented in its own submodule. Handlers that
//! can fail return `Result<(), String>`; `main` reports the error and exits.

pub mod config;
pub mod exams;
pub mod grade;
pub mod menu;
pub mod params;
pub mod report;
