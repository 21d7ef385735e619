//! Submission ledger port

use super::store::StoreError;
use async_trait::async_trait;
use estate_quorum_domain::{ApproverId, SubjectId, Submission};

/// Stores one live submission per `(subject, approver)`
///
/// The ledger is policy-agnostic: it never evaluates, the caller does.
#[async_trait]
pub trait SubmissionLedger: Send + Sync {
    /// Atomically delete the approver's prior submission (if any) and insert
    /// this one. Concurrent readers never observe the intermediate state.
    ///
    /// Returns the replaced submission, if there was one.
    async fn replace(&self, submission: Submission) -> Result<Option<Submission>, StoreError>;

    async fn get(
        &self,
        subject_id: SubjectId,
        approver_id: &ApproverId,
    ) -> Result<Option<Submission>, StoreError>;

    /// All live submissions for a subject, oldest first
    async fn list(&self, subject_id: SubjectId) -> Result<Vec<Submission>, StoreError>;
}
