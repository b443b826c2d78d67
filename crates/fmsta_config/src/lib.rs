//! Loading and validation of the run-time configuration shared by the FM
//! partitioner and the STA engine.
//!
//! This crate reads an optional TOML config file and produces a strongly
//! typed [`RunConfig`] with documented defaults, so a run can omit the
//! file entirely.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str};
pub use types::{RunConfig, ThresholdSchedule};
