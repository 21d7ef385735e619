//! Decision subject entity

use super::{GateKind, SubjectStatus};
use crate::core::ids::{LoanId, SubjectId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The gated entity: one per (loan, gate kind)
///
/// Created when the loan enters the gate's trigger condition and never
/// deleted. `status` is only changed through the transition step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionSubject {
    pub id: SubjectId,
    pub loan_id: LoanId,
    pub gate_kind: GateKind,
    pub status: SubjectStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DecisionSubject {
    /// Create a freshly opened, pending subject
    pub fn open(id: SubjectId, loan_id: LoanId, gate_kind: GateKind, now: DateTime<Utc>) -> Self {
        Self {
            id,
            loan_id,
            gate_kind,
            status: SubjectStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }
}

/// An observed status change of a subject
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: SubjectStatus,
    pub to: SubjectStatus,
}

impl Transition {
    /// Returns a transition only when the statuses differ (edge-triggered)
    pub fn between(from: SubjectStatus, to: SubjectStatus) -> Option<Self> {
        (from != to).then_some(Self { from, to })
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_subject_is_pending() {
        let now = Utc::now();
        let subject =
            DecisionSubject::open(SubjectId(1), LoanId(10), GateKind::CommitteeApproval, now);
        assert!(subject.status.is_pending());
        assert_eq!(subject.created_at, subject.updated_at);
    }

    #[test]
    fn test_transition_only_on_change() {
        assert!(Transition::between(SubjectStatus::Pending, SubjectStatus::Pending).is_none());
        let t = Transition::between(SubjectStatus::Pending, SubjectStatus::Approved).unwrap();
        assert_eq!(t.to_string(), "Pending -> Approved");
    }
}
