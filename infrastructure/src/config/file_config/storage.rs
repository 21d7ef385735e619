//! Storage and notification configuration from TOML
//! (`[storage]` and `[notifications]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the state snapshot lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    pub state_file: PathBuf,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            state_file: PathBuf::from("estate-quorum-state.json"),
        }
    }
}

/// Transition notification delivery
///
/// Without an outbox, transitions are logged through `tracing` only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNotificationsConfig {
    /// JSONL file each transition is appended to
    pub outbox: Option<PathBuf>,
}

/// Log output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write logs to this file instead of stderr
    pub file: Option<PathBuf>,
}
