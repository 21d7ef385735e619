//! Infrastructure layer for estate-quorum
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod notify;
pub mod store;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, ConfigValidationError, FileConfig, FileGatesConfig, Severity,
};
pub use notify::{
    DeferredTransitionNotifier, JsonlTransitionNotifier, TracingTransitionNotifier,
};
pub use store::{
    GateState, InMemoryGateStore, LoanRecord, SnapshotError, SnapshotFile, SnapshotLock,
    StateSession,
};
