//! Configuration parsing for storelink
//!
//! This crate handles parsing and validation of storelink.toml files and
//! layers them with environment variables and command-line overrides into a
//! single resolved `Settings` value.

pub mod merge;
pub mod toml;

// Re-export main types
pub use crate::merge::{ConfigLayering, ConfigLoader, ConfigSource, Settings};
pub use crate::toml::{ProbeSection, StorelinkToml, UpstreamSection};

use storelink_core::error::StoreError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, StoreError>;

/// Name of the project configuration file
pub const CONFIG_FILE_NAME: &str = "storelink.toml";
