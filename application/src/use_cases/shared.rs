//! Shared state for use cases.
//!
//! Holds the port handles every gate operation needs, the per-subject lock
//! table, and the evaluation helper used by submit, evaluate and status.

use crate::config::GateSettings;
use crate::error::GateError;
use crate::ports::approver_pool::ApproverPoolResolver;
use crate::ports::checklist_catalog::ChecklistCatalog;
use crate::ports::owning_entity::OwningEntityGate;
use crate::ports::quorum_config_store::QuorumConfigStore;
use crate::ports::subject_repository::SubjectRepository;
use crate::ports::submission_ledger::SubmissionLedger;
use crate::ports::transition_notifier::{NoTransitionNotifier, TransitionNotifier};
use estate_quorum_domain::{
    DecisionSubject, Evaluation, Policy, QuorumConfig, SubjectId, evaluate_checklist,
    evaluate_poll,
};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Per-subject serialization of the replace → evaluate → persist sequence.
///
/// Different subjects get different mutexes and never contend.
#[derive(Default)]
pub struct SubjectLocks {
    locks: Mutex<HashMap<SubjectId, Arc<AsyncMutex<()>>>>,
}

impl SubjectLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to a subject.
    pub async fn lock(&self, subject_id: SubjectId) -> OwnedMutexGuard<()> {
        let mutex = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            Arc::clone(locks.entry(subject_id).or_default())
        };
        mutex.lock_owned().await
    }
}

/// Ports and settings shared by all gate use cases.
#[derive(Clone)]
pub struct GateContext {
    pub(crate) subjects: Arc<dyn SubjectRepository>,
    pub(crate) ledger: Arc<dyn SubmissionLedger>,
    pub(crate) configs: Arc<dyn QuorumConfigStore>,
    pub(crate) checklist: Arc<dyn ChecklistCatalog>,
    pub(crate) pool: Arc<dyn ApproverPoolResolver>,
    pub(crate) owner: Arc<dyn OwningEntityGate>,
    pub(crate) notifier: Arc<dyn TransitionNotifier>,
    pub(crate) settings: Arc<GateSettings>,
    pub(crate) locks: Arc<SubjectLocks>,
}

impl GateContext {
    pub fn new(
        subjects: Arc<dyn SubjectRepository>,
        ledger: Arc<dyn SubmissionLedger>,
        configs: Arc<dyn QuorumConfigStore>,
        checklist: Arc<dyn ChecklistCatalog>,
        pool: Arc<dyn ApproverPoolResolver>,
        owner: Arc<dyn OwningEntityGate>,
    ) -> Self {
        Self {
            subjects,
            ledger,
            configs,
            checklist,
            pool,
            owner,
            notifier: Arc::new(NoTransitionNotifier),
            settings: Arc::new(GateSettings::default()),
            locks: Arc::new(SubjectLocks::new()),
        }
    }

    /// Wire every port to a single adapter that implements all of them.
    pub fn from_store<S>(store: Arc<S>) -> Self
    where
        S: SubjectRepository
            + SubmissionLedger
            + QuorumConfigStore
            + ChecklistCatalog
            + ApproverPoolResolver
            + OwningEntityGate
            + 'static,
    {
        Self::new(
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store.clone(),
            store,
        )
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn TransitionNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_settings(mut self, settings: GateSettings) -> Self {
        self.settings = Arc::new(settings);
        self
    }

    pub fn settings(&self) -> &GateSettings {
        &self.settings
    }

    pub(crate) async fn load_subject(
        &self,
        subject_id: SubjectId,
    ) -> Result<DecisionSubject, GateError> {
        match self.subjects.get(subject_id).await {
            Ok(subject) => Ok(subject),
            Err(e) if e.is_not_found() => Err(GateError::SubjectNotFound(subject_id)),
            Err(e) => Err(e.into()),
        }
    }

    pub(crate) async fn active_config(
        &self,
        subject: &DecisionSubject,
    ) -> Result<QuorumConfig, GateError> {
        self.configs
            .active(subject.gate_kind)
            .await?
            .ok_or(GateError::NoActiveConfig(subject.gate_kind))
    }

    /// Recompute a subject's status from a fresh read of pool, items,
    /// submissions and the active config. Writes nothing.
    pub(crate) async fn evaluate(&self, subject: &DecisionSubject) -> Result<Evaluation, GateError> {
        let config = self.active_config(subject).await?;
        let submissions = self.ledger.list(subject.id).await?;

        let evaluation = match subject.gate_kind.policy() {
            Policy::UnanimousPoll => {
                let group = self.settings.pool_group(subject.gate_kind);
                let pool = self.pool.members_of(group).await?;
                Evaluation::Poll(evaluate_poll(&pool, &submissions, config.required_approvers))
            }
            Policy::ItemQuorum => {
                let items = self.checklist.active_items().await?;
                Evaluation::Checklist(evaluate_checklist(
                    &items,
                    &submissions,
                    config.required_approvers,
                ))
            }
        };
        Ok(evaluation)
    }
}
