//! Subject status values

use serde::{Deserialize, Serialize};

/// Status of a decision subject
///
/// `Approved`/`Rejected` are produced by the committee poll, `Complete` by the
/// payout checklist. None of them is a lock: the status is recomputed on
/// every submission and may move again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SubjectStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Complete,
}

impl SubjectStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, SubjectStatus::Pending)
    }

    /// Whether the gate currently holds a decision (approved, rejected or complete)
    pub fn is_decided(&self) -> bool {
        !self.is_pending()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectStatus::Pending => "pending",
            SubjectStatus::Approved => "approved",
            SubjectStatus::Rejected => "rejected",
            SubjectStatus::Complete => "complete",
        }
    }
}

impl std::fmt::Display for SubjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubjectStatus::Pending => write!(f, "Pending"),
            SubjectStatus::Approved => write!(f, "Approved"),
            SubjectStatus::Rejected => write!(f, "Rejected"),
            SubjectStatus::Complete => write!(f, "Complete"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        assert_eq!(SubjectStatus::Approved.to_string(), "Approved");
        assert_eq!(SubjectStatus::Complete.as_str(), "complete");
    }

    #[test]
    fn test_default_is_pending() {
        assert!(SubjectStatus::default().is_pending());
        assert!(SubjectStatus::Rejected.is_decided());
    }
}
