//! Subject Status use case
//!
//! Read-only view of a subject: stored status plus a fresh per-item /
//! per-approver breakdown. Nothing is written and the notifier is not called.

use super::shared::GateContext;
use crate::error::GateError;
use estate_quorum_domain::{
    ApproverId, DecisionSubject, Evaluation, RequiredApprovers, SubjectId, SubjectStatus,
    Submission,
};
use serde::Serialize;

/// What a given approver sees of their own input
#[derive(Debug, Clone, Serialize)]
pub struct ViewerState {
    pub approver_id: ApproverId,
    pub has_submitted: bool,
    pub submission: Option<Submission>,
}

/// Status report for a subject
#[derive(Debug, Clone, Serialize)]
pub struct SubjectStatusReport {
    pub subject: DecisionSubject,
    /// Status as last persisted
    pub status: SubjectStatus,
    /// Status the policy yields right now; differs from `status` only when
    /// pool, items or config changed since the last submission
    pub projected: SubjectStatus,
    pub required_threshold: RequiredApprovers,
    pub pool_size: usize,
    pub closed_for_submissions: bool,
    pub evaluation: Evaluation,
    pub viewer: Option<ViewerState>,
}

pub struct SubjectStatusUseCase {
    ctx: GateContext,
}

impl SubjectStatusUseCase {
    pub fn new(ctx: GateContext) -> Self {
        Self { ctx }
    }

    pub async fn execute(
        &self,
        subject_id: SubjectId,
        viewer: Option<ApproverId>,
    ) -> Result<SubjectStatusReport, GateError> {
        let subject = self.ctx.load_subject(subject_id).await?;
        let evaluation = self.ctx.evaluate(&subject).await?;

        let pool_size = match &evaluation {
            Evaluation::Poll(tally) => tally.pool_size,
            Evaluation::Checklist(_) => {
                let group = self.ctx.settings.pool_group(subject.gate_kind);
                self.ctx.pool.members_of(group).await?.len()
            }
        };

        let closed_for_submissions = self.ctx.owner.is_closed_for_submissions(&subject).await?;

        let viewer = match viewer {
            Some(approver_id) => {
                let submission = self.ctx.ledger.get(subject.id, &approver_id).await?;
                Some(ViewerState {
                    approver_id,
                    has_submitted: submission.is_some(),
                    submission,
                })
            }
            None => None,
        };

        Ok(SubjectStatusReport {
            status: subject.status,
            projected: evaluation.status(),
            required_threshold: evaluation.required(),
            pool_size,
            closed_for_submissions,
            evaluation,
            viewer,
            subject,
        })
    }
}
