//! Pending Subjects use case
//!
//! Lists subjects still waiting for input, e.g. loans whose payout checklist
//! needs more sign-offs.

use super::shared::GateContext;
use crate::error::GateError;
use estate_quorum_domain::{ApproverId, DecisionSubject, GateKind, SubjectStatus};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct PendingSubject {
    pub subject: DecisionSubject,
    pub submissions: usize,
    /// Whether the viewer already has a live submission (false without a viewer)
    pub viewer_has_submitted: bool,
}

pub struct PendingSubjectsUseCase {
    ctx: GateContext,
}

impl PendingSubjectsUseCase {
    pub fn new(ctx: GateContext) -> Self {
        Self { ctx }
    }

    /// Pending subjects whose loan still accepts input
    pub async fn execute(
        &self,
        gate_kind: Option<GateKind>,
        viewer: Option<&ApproverId>,
    ) -> Result<Vec<PendingSubject>, GateError> {
        let subjects = self
            .ctx
            .subjects
            .list(gate_kind, Some(SubjectStatus::Pending))
            .await?;

        let mut pending = Vec::with_capacity(subjects.len());
        for subject in subjects {
            if self.ctx.owner.is_closed_for_submissions(&subject).await? {
                continue;
            }
            let submissions = self.ctx.ledger.list(subject.id).await?;
            let viewer_has_submitted =
                viewer.is_some_and(|v| submissions.iter().any(|s| &s.approver_id == v));
            pending.push(PendingSubject {
                submissions: submissions.len(),
                viewer_has_submitted,
                subject,
            });
        }
        Ok(pending)
    }
}
