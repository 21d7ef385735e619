//! Errors exposed by the gate use cases

use crate::ports::store::StoreError;
use estate_quorum_domain::{DomainError, GateKind, PayloadError, SubjectId};
use thiserror::Error;

/// Errors returned to the caller of a gate operation
///
/// Validation, precondition and configuration errors are raised before the
/// ledger is touched. Notification failures never appear here.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("Subject {0} not found")]
    SubjectNotFound(SubjectId),

    #[error("Subject {0} is closed for submissions")]
    SubjectClosed(SubjectId),

    #[error("Invalid payload: {0}")]
    InvalidPayload(#[from] PayloadError),

    #[error("No active {0} configuration; the gate is unavailable")]
    NoActiveConfig(GateKind),

    #[error("Invalid threshold: required approvers must be at least 1 (got {0})")]
    InvalidThreshold(usize),

    #[error(transparent)]
    Domain(DomainError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl From<DomainError> for GateError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::InvalidThreshold(count) => GateError::InvalidThreshold(count),
            DomainError::InvalidPayload(payload) => GateError::InvalidPayload(payload),
            other => GateError::Domain(other),
        }
    }
}

impl GateError {
    /// Errors caused by the request itself rather than by the system state
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            GateError::SubjectNotFound(_)
                | GateError::SubjectClosed(_)
                | GateError::InvalidPayload(_)
                | GateError::InvalidThreshold(_)
                | GateError::Domain(_)
        )
    }

    /// The configuration error callers treat as "feature unavailable"
    pub fn is_unavailable(&self) -> bool {
        matches!(self, GateError::NoActiveConfig(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_quorum_domain::ItemId;

    #[test]
    fn test_error_display() {
        assert_eq!(
            GateError::SubjectClosed(SubjectId(4)).to_string(),
            "Subject 4 is closed for submissions"
        );
        assert_eq!(
            GateError::NoActiveConfig(GateKind::PayoutChecklist).to_string(),
            "No active payout checklist configuration; the gate is unavailable"
        );
        assert_eq!(
            GateError::from(PayloadError::UnknownItem(ItemId(12))).to_string(),
            "Invalid payload: Invalid checklist item ID: 12"
        );
    }

    #[test]
    fn test_error_classification() {
        assert!(GateError::SubjectClosed(SubjectId(1)).is_client_error());
        assert!(GateError::InvalidThreshold(0).is_client_error());
        assert!(!GateError::NoActiveConfig(GateKind::CommitteeApproval).is_client_error());
        assert!(GateError::NoActiveConfig(GateKind::CommitteeApproval).is_unavailable());
        assert!(!GateError::Store(StoreError::Backend("disk".into())).is_client_error());
    }

    #[test]
    fn test_domain_errors_map_onto_the_exposed_variants() {
        assert!(matches!(
            GateError::from(DomainError::InvalidThreshold(0)),
            GateError::InvalidThreshold(0)
        ));
        assert!(matches!(
            GateError::from(DomainError::InvalidPayload(PayloadError::NoItemChecks)),
            GateError::InvalidPayload(PayloadError::NoItemChecks)
        ));
        assert!(matches!(
            GateError::from(DomainError::UnknownGateKind("board".into())),
            GateError::Domain(_)
        ));
    }
}
