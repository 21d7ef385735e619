//! Domain error types

use crate::core::ids::ItemId;
use crate::gate::GateKind;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Required approvers must be at least 1 (got {0})")]
    InvalidThreshold(usize),

    #[error("Unknown gate kind: {0}. Valid: committee, checklist")]
    UnknownGateKind(String),

    #[error("Unknown decision: {0}. Valid: approve, reject")]
    UnknownDecision(String),

    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] PayloadError),
}

/// Reasons a submission payload is rejected before the ledger is touched
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PayloadError {
    #[error("{got} payload submitted to a {expected} subject")]
    GateMismatch { expected: GateKind, got: GateKind },

    #[error("No checklist items provided")]
    NoItemChecks,

    #[error("Invalid checklist item ID: {0}")]
    UnknownItem(ItemId),

    #[error("Checklist item {0} is not active")]
    InactiveItem(ItemId),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_error_display() {
        let error = PayloadError::GateMismatch {
            expected: GateKind::PayoutChecklist,
            got: GateKind::CommitteeApproval,
        };
        assert_eq!(
            error.to_string(),
            "committee approval payload submitted to a payout checklist subject"
        );
        assert_eq!(
            PayloadError::UnknownItem(ItemId(9)).to_string(),
            "Invalid checklist item ID: 9"
        );
    }

    #[test]
    fn test_domain_error_wraps_payload_error() {
        let error: DomainError = PayloadError::NoItemChecks.into();
        assert_eq!(error.to_string(), "Invalid payload: No checklist items provided");
    }
}
