//! Gate trigger conditions
//!
//! Decides which gate a newly registered loan enters first.

use super::GateKind;
use serde::{Deserialize, Serialize};

/// Agreed-amount threshold at or above which a loan needs committee approval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommitteeTrigger {
    pub amount_threshold: u64,
}

impl Default for CommitteeTrigger {
    fn default() -> Self {
        Self {
            amount_threshold: 1_000_000,
        }
    }
}

impl CommitteeTrigger {
    pub fn new(amount_threshold: u64) -> Self {
        Self { amount_threshold }
    }

    pub fn requires_committee(&self, amount_agreed: u64) -> bool {
        amount_agreed >= self.amount_threshold
    }

    /// The first gate a loan of this amount has to pass
    pub fn entry_gate(&self, amount_agreed: u64) -> GateKind {
        if self.requires_committee(amount_agreed) {
            GateKind::CommitteeApproval
        } else {
            GateKind::PayoutChecklist
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_gate_by_amount() {
        let trigger = CommitteeTrigger::new(500_000);
        assert_eq!(trigger.entry_gate(499_999), GateKind::PayoutChecklist);
        assert_eq!(trigger.entry_gate(500_000), GateKind::CommitteeApproval);
    }

    #[test]
    fn test_default_threshold() {
        assert!(!CommitteeTrigger::default().requires_committee(999_999));
        assert!(CommitteeTrigger::default().requires_committee(1_000_000));
    }
}
