//! Table layout of the in-memory store
//!
//! `GateState` is both the live data behind [`InMemoryGateStore`](super::InMemoryGateStore)
//! and the document written by [`SnapshotFile`](super::SnapshotFile).

use estate_quorum_domain::{
    ApproverId, ChecklistItem, ConfigId, DecisionSubject, GateKind, GroupRef, ItemId, LoanId,
    QuorumConfig, SubjectId, Submission,
};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Owning loan as far as the gates are concerned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanRecord {
    pub id: LoanId,
    /// Agreed advance amount in whole currency units
    pub amount_agreed: u64,
    pub ready_for_payout: bool,
    pub paid_out: bool,
    /// Latest committee outcome, `None` until the committee has decided
    pub committee_approved: Option<bool>,
}

impl LoanRecord {
    pub fn new(id: LoanId, amount_agreed: u64) -> Self {
        Self {
            id,
            amount_agreed,
            ready_for_payout: false,
            paid_out: false,
            committee_approved: None,
        }
    }
}

/// All tables of the store
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateState {
    pub subjects: BTreeMap<SubjectId, DecisionSubject>,
    /// Live submissions per subject, oldest first, at most one per approver
    pub submissions: BTreeMap<SubjectId, Vec<Submission>>,
    /// Every config row ever stored, in creation order
    pub configs: Vec<QuorumConfig>,
    pub items: BTreeMap<ItemId, ChecklistItem>,
    pub loans: BTreeMap<LoanId, LoanRecord>,
    pub groups: BTreeMap<GroupRef, BTreeSet<ApproverId>>,
    pub next_subject_id: u64,
    pub next_config_id: u64,
    pub next_item_id: u64,
}

impl GateState {
    pub(crate) fn allocate_subject_id(&mut self) -> SubjectId {
        self.next_subject_id += 1;
        SubjectId(self.next_subject_id)
    }

    pub(crate) fn allocate_config_id(&mut self) -> ConfigId {
        self.next_config_id += 1;
        ConfigId(self.next_config_id)
    }

    pub(crate) fn allocate_item_id(&mut self) -> ItemId {
        self.next_item_id += 1;
        ItemId(self.next_item_id)
    }

    pub fn subject_for(&self, loan_id: LoanId, gate_kind: GateKind) -> Option<&DecisionSubject> {
        self.subjects
            .values()
            .find(|s| s.loan_id == loan_id && s.gate_kind == gate_kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use estate_quorum_domain::SubmissionPayload;

    #[test]
    fn test_state_survives_json() {
        let mut state = GateState::default();
        let id = state.allocate_subject_id();
        state.subjects.insert(
            id,
            DecisionSubject::open(id, LoanId(7), GateKind::PayoutChecklist, Utc::now()),
        );
        state.submissions.insert(
            id,
            vec![Submission::new(
                id,
                ApproverId::new("finance-1"),
                SubmissionPayload::Checklist(Default::default()),
                Utc::now(),
            )],
        );
        state
            .groups
            .entry(GroupRef::new("staff"))
            .or_default()
            .insert(ApproverId::new("finance-1"));
        state.loans.insert(LoanId(7), LoanRecord::new(LoanId(7), 250_000));

        let json = serde_json::to_string(&state).unwrap();
        let restored: GateState = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, state);
    }

    #[test]
    fn test_missing_tables_default_to_empty() {
        let state: GateState = serde_json::from_str(r#"{"next_subject_id": 3}"#).unwrap();
        assert!(state.subjects.is_empty());
        assert_eq!(state.next_subject_id, 3);
    }
}
