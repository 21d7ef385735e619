//! Configuration file loading for estate-quorum
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `ESTATE_QUORUM_*` environment variables
//! 2. `--config <path>` specified file
//! 3. Project root: `./estate-quorum.toml` or `./.estate-quorum.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/estate-quorum/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, ConfigValidationError, FileConfig, FileGatesConfig, FileLoggingConfig,
    FileNotificationsConfig, FileStorageConfig, Severity,
};
pub use loader::ConfigLoader;
