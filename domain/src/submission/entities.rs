//! Submission entity

use super::payload::SubmissionPayload;
use crate::core::ids::{ApproverId, SubjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One approver's live input for a subject
///
/// Unique on `(subject_id, approver_id)`: a later submission from the same
/// approver replaces the earlier one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    pub subject_id: SubjectId,
    pub approver_id: ApproverId,
    pub created_at: DateTime<Utc>,
    pub payload: SubmissionPayload,
}

impl Submission {
    pub fn new(
        subject_id: SubjectId,
        approver_id: ApproverId,
        payload: SubmissionPayload,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            subject_id,
            approver_id,
            created_at,
            payload,
        }
    }

    /// The `(subject, approver)` key the ledger is unique on
    pub fn key(&self) -> (SubjectId, &ApproverId) {
        (self.subject_id, &self.approver_id)
    }
}
