//! Evaluate Subject use case
//!
//! Recomputes a subject's status, persists it on change, runs the downstream
//! effects of the decision and fires the notifier once per transition.
//!
//! # Flow
//!
//! ```text
//! fresh read (pool / items, submissions, active config)
//!        ↓
//! policy → new status
//!        ↓
//! new == stored? ── yes ──→ no write, no notification
//!        ↓ no
//! compare-and-set status (commit)
//!        ↓
//! downstream effects (guarded, idempotent)
//!        ↓
//! TransitionNotifier::notify (failure logged, never rolled back)
//! ```

use super::shared::GateContext;
use crate::error::GateError;
use crate::ports::transition_notifier::TransitionEvent;
use estate_quorum_domain::{
    ApproverId, DecisionSubject, Evaluation, GateKind, SubjectId, SubjectStatus, Transition,
};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Downstream effects performed during one evaluation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Effects {
    /// This evaluation set the loan's ready-for-payout flag
    pub ready_for_payout_marked: bool,
    /// Checklist subject opened (or found) after a committee approval
    pub checklist_subject: Option<SubjectId>,
}

/// Result of one evaluation
#[derive(Debug, Clone, Serialize)]
pub struct EvaluateOutput {
    /// Stored status before the evaluation
    pub previous: SubjectStatus,
    /// The subject as stored after the evaluation
    pub subject: DecisionSubject,
    pub evaluation: Evaluation,
    /// Set only when this evaluation committed a status change
    pub transition: Option<Transition>,
    pub effects: Effects,
}

impl EvaluateOutput {
    pub fn status(&self) -> SubjectStatus {
        self.subject.status
    }

    /// `(old, new)` stored status around this evaluation
    pub fn statuses(&self) -> (SubjectStatus, SubjectStatus) {
        (self.previous, self.subject.status)
    }
}

/// Use case for re-evaluating a subject outside of a submission
pub struct EvaluateSubjectUseCase {
    ctx: GateContext,
}

impl EvaluateSubjectUseCase {
    pub fn new(ctx: GateContext) -> Self {
        Self { ctx }
    }

    pub async fn execute(&self, subject_id: SubjectId) -> Result<EvaluateOutput, GateError> {
        let _guard = self.ctx.locks.lock(subject_id).await;
        evaluate_locked(&self.ctx, subject_id, None).await
    }
}

/// Evaluate a subject while its lock is held by the caller.
pub(crate) async fn evaluate_locked(
    ctx: &GateContext,
    subject_id: SubjectId,
    triggered_by: Option<&ApproverId>,
) -> Result<EvaluateOutput, GateError> {
    let subject = ctx.load_subject(subject_id).await?;
    let previous = subject.status;
    let evaluation = ctx.evaluate(&subject).await?;
    let computed = evaluation.status();

    let transition = match Transition::between(subject.status, computed) {
        Some(transition) => commit(ctx, &subject, transition).await?,
        None => {
            debug!(subject = %subject_id, status = %computed, "status unchanged");
            None
        }
    };

    let subject = if transition.is_some() {
        ctx.load_subject(subject_id).await?
    } else {
        subject
    };

    let effects = apply_effects(ctx, &subject, computed).await;

    if let Some(transition) = transition {
        let mut metadata = evaluation.summary();
        if let Some(map) = metadata.as_object_mut() {
            map.insert(
                "effects".to_string(),
                serde_json::to_value(&effects).unwrap_or_default(),
            );
        }
        let event = TransitionEvent::new(&subject, transition, metadata)
            .triggered_by(triggered_by.cloned());
        if let Err(e) = ctx.notifier.notify(&event).await {
            warn!(
                subject = %subject_id,
                transition = %transition,
                "Transition notification failed, status change stands: {}",
                e
            );
        }
    }

    Ok(EvaluateOutput {
        previous,
        subject,
        evaluation,
        transition,
        effects,
    })
}

/// Persist the new status. Returns `None` if another writer already moved it.
async fn commit(
    ctx: &GateContext,
    subject: &DecisionSubject,
    transition: Transition,
) -> Result<Option<Transition>, GateError> {
    let written = ctx
        .subjects
        .compare_and_set_status(subject.id, transition.from, transition.to)
        .await?;
    if written {
        info!(
            subject = %subject.id,
            loan = %subject.loan_id,
            gate = %subject.gate_kind,
            "Subject status {}",
            transition
        );
        Ok(Some(transition))
    } else {
        debug!(subject = %subject.id, "status already moved by a concurrent writer");
        Ok(None)
    }
}

/// Run the loan-side effects of the computed status.
///
/// Every effect is idempotent and guarded on the loan's own state, so it is
/// safe to run on each evaluation; a failed attempt is retried by the next one.
async fn apply_effects(
    ctx: &GateContext,
    subject: &DecisionSubject,
    computed: SubjectStatus,
) -> Effects {
    let mut effects = Effects::default();

    match (subject.gate_kind, computed) {
        (GateKind::PayoutChecklist, SubjectStatus::Complete) => {
            match ctx.owner.mark_ready_for_payout(subject.loan_id).await {
                Ok(marked) => {
                    if marked {
                        info!(loan = %subject.loan_id, "Loan marked ready for payout");
                    }
                    effects.ready_for_payout_marked = marked;
                }
                Err(e) => warn!(loan = %subject.loan_id, "Could not mark loan ready for payout: {}", e),
            }
        }
        (GateKind::CommitteeApproval, SubjectStatus::Approved | SubjectStatus::Rejected) => {
            let approved = computed == SubjectStatus::Approved;
            if let Err(e) = ctx
                .owner
                .record_committee_decision(subject.loan_id, approved)
                .await
            {
                warn!(loan = %subject.loan_id, "Could not record committee decision: {}", e);
            }
            if approved {
                match ctx
                    .subjects
                    .open(subject.loan_id, GateKind::PayoutChecklist)
                    .await
                {
                    Ok(checklist) => effects.checklist_subject = Some(checklist.id),
                    Err(e) => warn!(loan = %subject.loan_id, "Could not open payout checklist: {}", e),
                }
            }
        }
        _ => {}
    }

    effects
}
