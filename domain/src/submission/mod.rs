//! Approver submissions
//!
//! - [`Submission`]: an approver's live input for a subject
//! - [`SubmissionPayload`]: committee vote or checklist sheet

pub mod entities;
pub mod payload;

pub use entities::Submission;
pub use payload::{ChecklistPayload, Decision, ItemCheck, SubmissionPayload};
