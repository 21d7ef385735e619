//! Gate kinds and the counting policy each one uses

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// The two financial-control gates a loan passes through
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateKind {
    /// Committee sign-off before a loan offer is approved
    CommitteeApproval,
    /// Multi-person checklist sign-off before a loan is marked ready for payout
    PayoutChecklist,
}

/// Counting rule applied to compute a subject's status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Every pool member must vote before a decision; approve iff approvals reach the threshold
    UnanimousPoll,
    /// Every active item needs the threshold of distinct checking approvers
    ItemQuorum,
}

impl GateKind {
    pub const ALL: [GateKind; 2] = [GateKind::CommitteeApproval, GateKind::PayoutChecklist];

    pub fn policy(&self) -> Policy {
        match self {
            GateKind::CommitteeApproval => Policy::UnanimousPoll,
            GateKind::PayoutChecklist => Policy::ItemQuorum,
        }
    }

    /// Short identifier used on the command line and in config files
    pub fn as_str(&self) -> &'static str {
        match self {
            GateKind::CommitteeApproval => "committee",
            GateKind::PayoutChecklist => "checklist",
        }
    }
}

impl std::fmt::Display for GateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GateKind::CommitteeApproval => write!(f, "committee approval"),
            GateKind::PayoutChecklist => write!(f, "payout checklist"),
        }
    }
}

impl std::str::FromStr for GateKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "committee" | "committee_approval" => Ok(GateKind::CommitteeApproval),
            "checklist" | "payout_checklist" | "payout" => Ok(GateKind::PayoutChecklist),
            other => Err(DomainError::UnknownGateKind(other.to_string())),
        }
    }
}

impl std::fmt::Display for Policy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Policy::UnanimousPoll => write!(f, "unanimous-poll threshold"),
            Policy::ItemQuorum => write!(f, "item-level quorum"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_per_gate() {
        assert_eq!(GateKind::CommitteeApproval.policy(), Policy::UnanimousPoll);
        assert_eq!(GateKind::PayoutChecklist.policy(), Policy::ItemQuorum);
    }

    #[test]
    fn test_parse_gate_kind() {
        assert_eq!("committee".parse::<GateKind>(), Ok(GateKind::CommitteeApproval));
        assert_eq!(
            "Payout-Checklist".parse::<GateKind>(),
            Ok(GateKind::PayoutChecklist)
        );
        assert!(matches!(
            "treasury".parse::<GateKind>(),
            Err(DomainError::UnknownGateKind(_))
        ));
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&GateKind::PayoutChecklist).unwrap();
        assert_eq!(json, "\"payout_checklist\"");
    }
}
