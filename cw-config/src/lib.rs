//! Global configuration for the cw bridge.
//!
//! The configuration lives in `<config dir>/cw/config.yaml` and controls how
//! `cwctl` is located, which runtime version is expected, and how long each
//! class of operation may run.

pub mod global_config;
pub mod loader;

pub use global_config::{CliConfig, OperationClass, TimeoutSettings, WaitSettings};
pub use loader::ConfigLoader;
