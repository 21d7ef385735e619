//! Submit use case
//!
//! Accepts one approver's input for a subject: replaces any earlier input from
//! the same approver, then re-evaluates the subject. Both steps run under the
//! subject's lock, so concurrent "last missing vote" submissions are applied
//! one after another and only one of them observes the transition.

use super::evaluate::{Effects, evaluate_locked};
use super::shared::GateContext;
use crate::error::GateError;
use chrono::Utc;
use estate_quorum_domain::{
    ApproverId, Evaluation, GateKind, PayloadError, SubjectId, SubjectStatus, Submission,
    SubmissionPayload, Transition,
};
use serde::Serialize;
use tracing::info;

/// Input for the Submit use case
#[derive(Debug, Clone)]
pub struct SubmitInput {
    pub subject_id: SubjectId,
    pub approver_id: ApproverId,
    pub payload: SubmissionPayload,
}

impl SubmitInput {
    pub fn new(
        subject_id: SubjectId,
        approver_id: impl Into<ApproverId>,
        payload: impl Into<SubmissionPayload>,
    ) -> Self {
        Self {
            subject_id,
            approver_id: approver_id.into(),
            payload: payload.into(),
        }
    }
}

/// Output of the Submit use case
#[derive(Debug, Clone, Serialize)]
pub struct SubmitOutput {
    /// The submission now live in the ledger
    pub submission: Submission,
    /// Whether an earlier submission from this approver was replaced
    pub replaced: bool,
    /// Subject status after evaluation
    pub status: SubjectStatus,
    pub transition: Option<Transition>,
    pub evaluation: Evaluation,
    pub effects: Effects,
}

/// Use case for submitting a committee vote or a checklist sheet
pub struct SubmitUseCase {
    ctx: GateContext,
}

impl SubmitUseCase {
    pub fn new(ctx: GateContext) -> Self {
        Self { ctx }
    }

    pub async fn execute(&self, input: SubmitInput) -> Result<SubmitOutput, GateError> {
        let _guard = self.ctx.locks.lock(input.subject_id).await;

        let subject = self.ctx.load_subject(input.subject_id).await?;
        if self.ctx.owner.is_closed_for_submissions(&subject).await? {
            return Err(GateError::SubjectClosed(subject.id));
        }
        self.ctx.active_config(&subject).await?;
        self.validate(subject.gate_kind, &input.payload).await?;

        let submission = Submission::new(
            subject.id,
            input.approver_id.clone(),
            input.payload,
            Utc::now(),
        );
        let replaced = self.ctx.ledger.replace(submission.clone()).await?.is_some();
        info!(
            subject = %subject.id,
            approver = %submission.approver_id,
            replaced,
            "Submission recorded"
        );

        let outcome = evaluate_locked(&self.ctx, subject.id, Some(&input.approver_id)).await?;

        Ok(SubmitOutput {
            submission,
            replaced,
            status: outcome.status(),
            transition: outcome.transition,
            evaluation: outcome.evaluation,
            effects: outcome.effects,
        })
    }

    /// Reject malformed payloads before anything is written.
    async fn validate(
        &self,
        gate_kind: GateKind,
        payload: &SubmissionPayload,
    ) -> Result<(), GateError> {
        payload.validate_for(gate_kind)?;

        if let Some(sheet) = payload.checklist() {
            for item_id in sheet.item_checks.keys() {
                match self.ctx.checklist.item(*item_id).await? {
                    None => return Err(PayloadError::UnknownItem(*item_id).into()),
                    Some(item) if !item.is_active => {
                        return Err(PayloadError::InactiveItem(*item_id).into());
                    }
                    Some(_) => {}
                }
            }
        }
        Ok(())
    }
}
