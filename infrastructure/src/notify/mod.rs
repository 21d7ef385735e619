//! Transition notifier adapters.
//!
//! - [`JsonlTransitionNotifier`]: appends each transition to a JSONL outbox
//! - [`TracingTransitionNotifier`]: logs each transition through `tracing`
//! - [`DeferredTransitionNotifier`]: queues transitions until the state is saved

mod deferred;
mod jsonl;
mod log;

pub use deferred::DeferredTransitionNotifier;
pub use jsonl::JsonlTransitionNotifier;
pub use log::TracingTransitionNotifier;
