//! Gate settings: which groups vote and when the committee gate applies.
//!
//! [`GateSettings`] is static for the lifetime of the engine. Thresholds are
//! not part of it: they live in the quorum config store and are read fresh on
//! every evaluation.

use estate_quorum_domain::{CommitteeTrigger, GateKind, GroupRef};
use serde::{Deserialize, Serialize};

/// Static gate wiring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateSettings {
    /// Team whose current members form the committee pool.
    pub committee_group: GroupRef,
    /// Group of staff principals allowed to sign the payout checklist.
    pub staff_group: GroupRef,
    /// Amount at or above which a loan needs committee approval.
    pub committee_trigger: CommitteeTrigger,
}

impl Default for GateSettings {
    fn default() -> Self {
        Self {
            committee_group: GroupRef::new("committee_members"),
            staff_group: GroupRef::new("staff"),
            committee_trigger: CommitteeTrigger::default(),
        }
    }
}

impl GateSettings {
    // ==================== Builder Methods ====================

    pub fn with_committee_group(mut self, group: impl Into<String>) -> Self {
        self.committee_group = GroupRef::new(group);
        self
    }

    pub fn with_staff_group(mut self, group: impl Into<String>) -> Self {
        self.staff_group = GroupRef::new(group);
        self
    }

    pub fn with_committee_threshold(mut self, amount: u64) -> Self {
        self.committee_trigger = CommitteeTrigger::new(amount);
        self
    }

    // ==================== Accessors ====================

    /// The approver group a gate's pool is drawn from.
    pub fn pool_group(&self, gate_kind: GateKind) -> &GroupRef {
        match gate_kind {
            GateKind::CommitteeApproval => &self.committee_group,
            GateKind::PayoutChecklist => &self.staff_group,
        }
    }
}
