//! Shared pieces of the `wgida` binary.

pub mod config;

pub use config::{Config, ConfigError};
