//! Domain layer for estate-quorum
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Gates
//!
//! A loan (advancement) passes two financial-control gates, each guarded by
//! several independently timed staff inputs:
//!
//! - **Committee approval**: every committee member votes; the offer is
//!   approved once the poll is complete and approvals reach the threshold
//! - **Payout checklist**: every active checklist item must be checked by
//!   enough distinct staff members before the loan is ready for payout
//!
//! ## Submissions
//!
//! Each approver has at most one live submission per subject. Resubmitting
//! replaces it, so inputs never accumulate.

pub mod checklist;
pub mod core;
pub mod gate;
pub mod quorum;
pub mod submission;

// Re-export commonly used types
pub use checklist::ChecklistItem;
pub use core::{
    error::{DomainError, PayloadError},
    ids::{ApproverId, ConfigId, GroupRef, ItemId, LoanId, SubjectId},
};
pub use gate::{CommitteeTrigger, DecisionSubject, GateKind, Policy, SubjectStatus, Transition};
pub use quorum::{
    ApproverProgress, Ballot, ChecklistTally, Evaluation, ItemTally, PollTally, QuorumConfig,
    RequiredApprovers, evaluate_checklist, evaluate_poll,
};
pub use submission::{ChecklistPayload, Decision, ItemCheck, Submission, SubmissionPayload};
