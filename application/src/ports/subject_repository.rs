//! Decision subject persistence port

use super::store::StoreError;
use async_trait::async_trait;
use estate_quorum_domain::{DecisionSubject, GateKind, LoanId, SubjectId, SubjectStatus};

/// Storage for decision subjects
///
/// Subjects are never deleted. The status is only written through
/// [`compare_and_set_status`](SubjectRepository::compare_and_set_status).
#[async_trait]
pub trait SubjectRepository: Send + Sync {
    async fn get(&self, id: SubjectId) -> Result<DecisionSubject, StoreError>;

    async fn find(
        &self,
        loan_id: LoanId,
        gate_kind: GateKind,
    ) -> Result<Option<DecisionSubject>, StoreError>;

    /// Return the subject for `(loan, gate)`, creating a pending one if absent
    async fn open(&self, loan_id: LoanId, gate_kind: GateKind)
    -> Result<DecisionSubject, StoreError>;

    /// Write `new` only if the stored status still equals `expected`
    ///
    /// Returns `false` (and writes nothing) when another writer got there first.
    async fn compare_and_set_status(
        &self,
        id: SubjectId,
        expected: SubjectStatus,
        new: SubjectStatus,
    ) -> Result<bool, StoreError>;

    async fn list(
        &self,
        gate_kind: Option<GateKind>,
        status: Option<SubjectStatus>,
    ) -> Result<Vec<DecisionSubject>, StoreError>;
}
