//! Submission payloads, one shape per gate kind

use crate::core::error::{DomainError, PayloadError};
use crate::core::ids::ItemId;
use crate::gate::GateKind;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A committee member's vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    pub fn is_approve(&self) -> bool {
        matches!(self, Decision::Approve)
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Approve => write!(f, "approve"),
            Decision::Reject => write!(f, "reject"),
        }
    }
}

impl std::str::FromStr for Decision {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "approve" | "approved" | "yes" => Ok(Decision::Approve),
            "reject" | "rejected" | "no" => Ok(Decision::Reject),
            other => Err(DomainError::UnknownDecision(other.to_string())),
        }
    }
}

/// One approver's check of a single checklist item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ItemCheck {
    pub checked: bool,
    #[serde(default)]
    pub notes: String,
}

impl ItemCheck {
    pub fn checked() -> Self {
        Self {
            checked: true,
            notes: String::new(),
        }
    }

    pub fn unchecked() -> Self {
        Self::default()
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// A staff member's full checklist submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChecklistPayload {
    #[serde(default)]
    pub notes: String,
    pub item_checks: BTreeMap<ItemId, ItemCheck>,
}

impl ChecklistPayload {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(mut self, item: ItemId) -> Self {
        self.item_checks.insert(item, ItemCheck::checked());
        self
    }

    pub fn uncheck(mut self, item: ItemId) -> Self {
        self.item_checks.insert(item, ItemCheck::unchecked());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn is_checked(&self, item: ItemId) -> bool {
        self.item_checks.get(&item).is_some_and(|c| c.checked)
    }

    /// Items this submission marks as checked
    pub fn checked_items(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.item_checks
            .iter()
            .filter(|(_, check)| check.checked)
            .map(|(id, _)| *id)
    }
}

/// Payload of a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionPayload {
    Committee { decision: Decision },
    Checklist(ChecklistPayload),
}

impl SubmissionPayload {
    pub fn approve() -> Self {
        SubmissionPayload::Committee {
            decision: Decision::Approve,
        }
    }

    pub fn reject() -> Self {
        SubmissionPayload::Committee {
            decision: Decision::Reject,
        }
    }

    /// The gate this payload shape belongs to
    pub fn gate_kind(&self) -> GateKind {
        match self {
            SubmissionPayload::Committee { .. } => GateKind::CommitteeApproval,
            SubmissionPayload::Checklist(_) => GateKind::PayoutChecklist,
        }
    }

    pub fn decision(&self) -> Option<Decision> {
        match self {
            SubmissionPayload::Committee { decision } => Some(*decision),
            SubmissionPayload::Checklist(_) => None,
        }
    }

    pub fn checklist(&self) -> Option<&ChecklistPayload> {
        match self {
            SubmissionPayload::Checklist(payload) => Some(payload),
            SubmissionPayload::Committee { .. } => None,
        }
    }

    /// Shape checks that need no external lookup
    ///
    /// Item existence is checked separately against the checklist catalog.
    pub fn validate_for(&self, gate: GateKind) -> Result<(), PayloadError> {
        let got = self.gate_kind();
        if got != gate {
            return Err(PayloadError::GateMismatch { expected: gate, got });
        }
        if let SubmissionPayload::Checklist(payload) = self
            && payload.item_checks.is_empty()
        {
            return Err(PayloadError::NoItemChecks);
        }
        Ok(())
    }
}

impl From<Decision> for SubmissionPayload {
    fn from(decision: Decision) -> Self {
        SubmissionPayload::Committee { decision }
    }
}

impl From<ChecklistPayload> for SubmissionPayload {
    fn from(payload: ChecklistPayload) -> Self {
        SubmissionPayload::Checklist(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decision() {
        assert_eq!("Approve".parse::<Decision>(), Ok(Decision::Approve));
        assert_eq!("no".parse::<Decision>(), Ok(Decision::Reject));
        assert!("maybe".parse::<Decision>().is_err());
    }

    #[test]
    fn test_checklist_builder() {
        let payload = ChecklistPayload::new()
            .check(ItemId(1))
            .uncheck(ItemId(2))
            .with_notes("ID verified");
        assert!(payload.is_checked(ItemId(1)));
        assert!(!payload.is_checked(ItemId(2)));
        assert!(!payload.is_checked(ItemId(3)));
        assert_eq!(payload.checked_items().collect::<Vec<_>>(), vec![ItemId(1)]);
    }

    #[test]
    fn test_validate_gate_mismatch() {
        let payload = SubmissionPayload::approve();
        assert_eq!(
            payload.validate_for(GateKind::PayoutChecklist),
            Err(PayloadError::GateMismatch {
                expected: GateKind::PayoutChecklist,
                got: GateKind::CommitteeApproval,
            })
        );
        assert!(payload.validate_for(GateKind::CommitteeApproval).is_ok());
    }

    #[test]
    fn test_validate_empty_checklist() {
        let payload = SubmissionPayload::from(ChecklistPayload::new());
        assert_eq!(
            payload.validate_for(GateKind::PayoutChecklist),
            Err(PayloadError::NoItemChecks)
        );
    }

    #[test]
    fn test_payload_json_shape() {
        let json = serde_json::to_value(SubmissionPayload::reject()).unwrap();
        assert_eq!(json["committee"]["decision"], "reject");

        let checklist = SubmissionPayload::from(ChecklistPayload::new().check(ItemId(3)));
        let json = serde_json::to_string(&checklist).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["checklist"]["item_checks"]["3"]["checked"], true);

        let back: SubmissionPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, checklist);
    }
}
