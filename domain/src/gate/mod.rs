//! Gated subjects
//!
//! - [`GateKind`]: committee approval or payout checklist
//! - [`DecisionSubject`]: the per-loan, per-gate entity holding the status
//! - [`Transition`]: an observed status change
//! - [`CommitteeTrigger`]: which gate a loan enters first

pub mod kind;
pub mod status;
pub mod subject;
pub mod trigger;

pub use kind::{GateKind, Policy};
pub use status::SubjectStatus;
pub use subject::{DecisionSubject, Transition};
pub use trigger::CommitteeTrigger;
