//! FormFill command-line front end.
//!
//! Exposes modules for integration testing.

pub mod cli;
pub mod config;
pub mod session;

pub use config::Config;
