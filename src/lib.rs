//! Shared library for `Libretto`
//! Contains the exam record model, the grade aggregator, persistence and the interactive shell

pub mod core;
pub mod logger;
pub mod shell;

pub use core::config;
pub use core::get_version;
