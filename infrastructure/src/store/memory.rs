//! In-memory implementation of every persistence port
//!
//! All tables live behind a single `RwLock`, so each port call is one atomic
//! step: `replace` swaps an approver's submission without a window where the
//! old one is gone and the new one is missing, and `compare_and_set_status`
//! checks and writes under the same write guard.

use super::state::{GateState, LoanRecord};
use async_trait::async_trait;
use chrono::Utc;
use estate_quorum_application::{
    ApproverPoolResolver, ChecklistCatalog, OwningEntityGate, QuorumConfigStore, StoreError,
    SubjectRepository, SubmissionLedger,
};
use estate_quorum_domain::{
    ApproverId, ChecklistItem, ConfigId, DecisionSubject, GateKind, GroupRef, ItemId, LoanId,
    QuorumConfig, RequiredApprovers, SubjectId, SubjectStatus, Submission,
    checklist::sort_for_display,
};
use std::collections::BTreeSet;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

/// Store holding subjects, submissions, configs, checklist items, loans and
/// approver groups in process memory.
#[derive(Debug, Default)]
pub struct InMemoryGateStore {
    state: RwLock<GateState>,
}

impl InMemoryGateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_state(state: GateState) -> Self {
        Self {
            state: RwLock::new(state),
        }
    }

    /// Copy of all tables, e.g. for writing a snapshot
    pub fn snapshot(&self) -> Result<GateState, StoreError> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, GateState>, StoreError> {
        self.state
            .read()
            .map_err(|_| StoreError::Backend("state lock poisoned".to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, GateState>, StoreError> {
        self.state
            .write()
            .map_err(|_| StoreError::Backend("state lock poisoned".to_string()))
    }

    // ==================== Administration ====================

    /// Register (or re-register with a new amount) a loan
    pub fn register_loan(&self, id: LoanId, amount_agreed: u64) -> Result<LoanRecord, StoreError> {
        let mut state = self.write()?;
        let loan = state
            .loans
            .entry(id)
            .and_modify(|l| l.amount_agreed = amount_agreed)
            .or_insert_with(|| LoanRecord::new(id, amount_agreed))
            .clone();
        Ok(loan)
    }

    pub fn loan(&self, id: LoanId) -> Result<Option<LoanRecord>, StoreError> {
        Ok(self.read()?.loans.get(&id).cloned())
    }

    /// Mark a loan as paid out, which closes all of its gates to input
    pub fn mark_paid_out(&self, id: LoanId) -> Result<LoanRecord, StoreError> {
        let mut state = self.write()?;
        let loan = state
            .loans
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Loan", id))?;
        loan.paid_out = true;
        Ok(loan.clone())
    }

    pub fn add_item(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        order: u32,
    ) -> Result<ChecklistItem, StoreError> {
        let mut state = self.write()?;
        let id = state.allocate_item_id();
        let item = ChecklistItem::new(id, title)
            .with_description(description)
            .with_order(order);
        state.items.insert(id, item.clone());
        Ok(item)
    }

    /// Deactivate an item. Existing checks of it stop counting on the next evaluation.
    pub fn deactivate_item(&self, id: ItemId) -> Result<ChecklistItem, StoreError> {
        let mut state = self.write()?;
        let item = state
            .items
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Checklist item", id))?;
        item.is_active = false;
        Ok(item.clone())
    }

    /// Returns `false` if the approver already was a member
    pub fn add_member(&self, group: &GroupRef, approver: ApproverId) -> Result<bool, StoreError> {
        Ok(self
            .write()?
            .groups
            .entry(group.clone())
            .or_default()
            .insert(approver))
    }

    /// Returns `false` if the approver was not a member
    pub fn remove_member(&self, group: &GroupRef, approver: &ApproverId) -> Result<bool, StoreError> {
        Ok(self
            .write()?
            .groups
            .get_mut(group)
            .is_some_and(|members| members.remove(approver)))
    }
}

#[async_trait]
impl SubjectRepository for InMemoryGateStore {
    async fn get(&self, id: SubjectId) -> Result<DecisionSubject, StoreError> {
        self.read()?
            .subjects
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found("Subject", id))
    }

    async fn find(
        &self,
        loan_id: LoanId,
        gate_kind: GateKind,
    ) -> Result<Option<DecisionSubject>, StoreError> {
        Ok(self.read()?.subject_for(loan_id, gate_kind).cloned())
    }

    async fn open(
        &self,
        loan_id: LoanId,
        gate_kind: GateKind,
    ) -> Result<DecisionSubject, StoreError> {
        let mut state = self.write()?;
        if !state.loans.contains_key(&loan_id) {
            return Err(StoreError::not_found("Loan", loan_id));
        }
        if let Some(existing) = state.subject_for(loan_id, gate_kind) {
            return Ok(existing.clone());
        }
        let id = state.allocate_subject_id();
        let subject = DecisionSubject::open(id, loan_id, gate_kind, Utc::now());
        state.subjects.insert(id, subject.clone());
        debug!(subject = %id, loan = %loan_id, gate = %gate_kind, "Subject created");
        Ok(subject)
    }

    async fn compare_and_set_status(
        &self,
        id: SubjectId,
        expected: SubjectStatus,
        new: SubjectStatus,
    ) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        let subject = state
            .subjects
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found("Subject", id))?;
        if subject.status != expected {
            return Ok(false);
        }
        subject.status = new;
        subject.updated_at = Utc::now();
        Ok(true)
    }

    async fn list(
        &self,
        gate_kind: Option<GateKind>,
        status: Option<SubjectStatus>,
    ) -> Result<Vec<DecisionSubject>, StoreError> {
        Ok(self
            .read()?
            .subjects
            .values()
            .filter(|s| gate_kind.is_none_or(|k| s.gate_kind == k))
            .filter(|s| status.is_none_or(|st| s.status == st))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl SubmissionLedger for InMemoryGateStore {
    async fn replace(&self, submission: Submission) -> Result<Option<Submission>, StoreError> {
        let mut state = self.write()?;
        if !state.subjects.contains_key(&submission.subject_id) {
            return Err(StoreError::not_found("Subject", submission.subject_id));
        }
        let live = state.submissions.entry(submission.subject_id).or_default();
        let previous = live
            .iter()
            .position(|s| s.approver_id == submission.approver_id)
            .map(|index| live.remove(index));
        live.push(submission);
        Ok(previous)
    }

    async fn get(
        &self,
        subject_id: SubjectId,
        approver_id: &ApproverId,
    ) -> Result<Option<Submission>, StoreError> {
        Ok(self.read()?.submissions.get(&subject_id).and_then(|live| {
            live.iter()
                .find(|s| &s.approver_id == approver_id)
                .cloned()
        }))
    }

    async fn list(&self, subject_id: SubjectId) -> Result<Vec<Submission>, StoreError> {
        Ok(self
            .read()?
            .submissions
            .get(&subject_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl QuorumConfigStore for InMemoryGateStore {
    async fn active(&self, gate_kind: GateKind) -> Result<Option<QuorumConfig>, StoreError> {
        Ok(self
            .read()?
            .configs
            .iter()
            .find(|c| c.gate_kind == gate_kind && c.active)
            .cloned())
    }

    async fn set_active(
        &self,
        gate_kind: GateKind,
        required_approvers: RequiredApprovers,
    ) -> Result<QuorumConfig, StoreError> {
        let mut state = self.write()?;
        for config in state.configs.iter_mut().filter(|c| c.gate_kind == gate_kind) {
            config.active = false;
        }
        let id = state.allocate_config_id();
        let config = QuorumConfig::new(id, gate_kind, required_approvers, Utc::now());
        state.configs.push(config.clone());
        Ok(config)
    }

    async fn activate(&self, id: ConfigId) -> Result<QuorumConfig, StoreError> {
        let mut state = self.write()?;
        let gate_kind = state
            .configs
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.gate_kind)
            .ok_or_else(|| StoreError::not_found("Quorum config", id))?;
        let mut activated = None;
        for config in state.configs.iter_mut().filter(|c| c.gate_kind == gate_kind) {
            config.active = config.id == id;
            if config.active {
                activated = Some(config.clone());
            }
        }
        activated.ok_or_else(|| StoreError::not_found("Quorum config", id))
    }

    async fn history(&self, gate_kind: GateKind) -> Result<Vec<QuorumConfig>, StoreError> {
        Ok(self
            .read()?
            .configs
            .iter()
            .filter(|c| c.gate_kind == gate_kind)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ChecklistCatalog for InMemoryGateStore {
    async fn active_items(&self) -> Result<Vec<ChecklistItem>, StoreError> {
        let mut items: Vec<_> = self
            .read()?
            .items
            .values()
            .filter(|i| i.is_active)
            .cloned()
            .collect();
        sort_for_display(&mut items);
        Ok(items)
    }

    async fn item(&self, id: ItemId) -> Result<Option<ChecklistItem>, StoreError> {
        Ok(self.read()?.items.get(&id).cloned())
    }
}

#[async_trait]
impl ApproverPoolResolver for InMemoryGateStore {
    async fn members_of(&self, group: &GroupRef) -> Result<BTreeSet<ApproverId>, StoreError> {
        Ok(self.read()?.groups.get(group).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl OwningEntityGate for InMemoryGateStore {
    async fn is_closed_for_submissions(
        &self,
        subject: &DecisionSubject,
    ) -> Result<bool, StoreError> {
        Ok(self
            .read()?
            .loans
            .get(&subject.loan_id)
            .is_some_and(|loan| loan.paid_out))
    }

    async fn mark_ready_for_payout(&self, loan_id: LoanId) -> Result<bool, StoreError> {
        let mut state = self.write()?;
        let loan = state
            .loans
            .get_mut(&loan_id)
            .ok_or_else(|| StoreError::not_found("Loan", loan_id))?;
        if loan.ready_for_payout {
            return Ok(false);
        }
        loan.ready_for_payout = true;
        Ok(true)
    }

    async fn record_committee_decision(
        &self,
        loan_id: LoanId,
        approved: bool,
    ) -> Result<(), StoreError> {
        let mut state = self.write()?;
        let loan = state
            .loans
            .get_mut(&loan_id)
            .ok_or_else(|| StoreError::not_found("Loan", loan_id))?;
        loan.committee_approved = Some(approved);
        Ok(())
    }
}
