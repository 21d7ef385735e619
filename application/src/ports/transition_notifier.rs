//! Port for announcing subject status transitions.
//!
//! The notifier is invoked exactly once per observed transition, after the
//! status write has committed. Delivery is best-effort: a failure is logged by
//! the caller and never rolls the transition back or reaches the approver.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use estate_quorum_domain::{
    ApproverId, DecisionSubject, GateKind, LoanId, SubjectId, SubjectStatus, Transition,
};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// A committed status transition
#[derive(Debug, Clone, Serialize)]
pub struct TransitionEvent {
    pub subject_id: SubjectId,
    pub loan_id: LoanId,
    pub gate_kind: GateKind,
    pub old: SubjectStatus,
    pub new: SubjectStatus,
    /// The approver whose submission caused the evaluation, if any
    pub triggered_by: Option<ApproverId>,
    pub occurred_at: DateTime<Utc>,
    /// Tally counters and downstream effects, as a JSON object
    pub metadata: Value,
}

impl TransitionEvent {
    pub fn new(subject: &DecisionSubject, transition: Transition, metadata: Value) -> Self {
        Self {
            subject_id: subject.id,
            loan_id: subject.loan_id,
            gate_kind: subject.gate_kind,
            old: transition.from,
            new: transition.to,
            triggered_by: None,
            occurred_at: Utc::now(),
            metadata,
        }
    }

    pub fn triggered_by(mut self, approver: Option<ApproverId>) -> Self {
        self.triggered_by = approver;
        self
    }

    /// Human-readable notification text
    pub fn message(&self) -> String {
        match (self.gate_kind, self.new) {
            (GateKind::CommitteeApproval, SubjectStatus::Approved) => format!(
                "Advancement: {} has been approved by committee members",
                self.loan_id
            ),
            (GateKind::CommitteeApproval, SubjectStatus::Rejected) => format!(
                "Advancement: {} has been rejected by committee members",
                self.loan_id
            ),
            (GateKind::PayoutChecklist, SubjectStatus::Complete) => format!(
                "Advancement: {} finance checklist is complete and the loan is ready for payout",
                self.loan_id
            ),
            (gate, status) => format!(
                "Advancement: {} {} status changed from {} to {}",
                self.loan_id, gate, self.old, status
            ),
        }
    }
}

#[derive(Error, Debug)]
pub enum NotifyError {
    #[error("Notification delivery failed: {0}")]
    Delivery(String),

    #[error("Notification channel unavailable")]
    Unavailable,
}

#[async_trait]
pub trait TransitionNotifier: Send + Sync {
    async fn notify(&self, event: &TransitionEvent) -> Result<(), NotifyError>;
}

/// No-op implementation for tests and when notifications are disabled.
pub struct NoTransitionNotifier;

#[async_trait]
impl TransitionNotifier for NoTransitionNotifier {
    async fn notify(&self, _event: &TransitionEvent) -> Result<(), NotifyError> {
        Ok(())
    }
}
