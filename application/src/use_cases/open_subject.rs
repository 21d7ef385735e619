//! Open Subject use case
//!
//! Creates the decision subject when a loan enters a gate's trigger
//! condition. Opening is get-or-create: there is one subject per
//! `(loan, gate kind)` however often this runs.

use super::shared::GateContext;
use crate::error::GateError;
use estate_quorum_domain::{DecisionSubject, GateKind, LoanId};
use tracing::info;

pub struct OpenSubjectUseCase {
    ctx: GateContext,
}

impl OpenSubjectUseCase {
    pub fn new(ctx: GateContext) -> Self {
        Self { ctx }
    }

    pub async fn execute(
        &self,
        loan_id: LoanId,
        gate_kind: GateKind,
    ) -> Result<DecisionSubject, GateError> {
        let subject = self.ctx.subjects.open(loan_id, gate_kind).await?;
        info!(loan = %loan_id, gate = %gate_kind, subject = %subject.id, "Subject open");
        Ok(subject)
    }

    /// Open the first gate a loan of this agreed amount has to pass
    ///
    /// Loans at or above the committee threshold start at committee approval;
    /// the payout checklist opens once the committee approves. Smaller loans
    /// go straight to the checklist.
    pub async fn open_for_loan(
        &self,
        loan_id: LoanId,
        amount_agreed: u64,
    ) -> Result<DecisionSubject, GateError> {
        let gate_kind = self
            .ctx
            .settings
            .committee_trigger
            .entry_gate(amount_agreed);
        self.execute(loan_id, gate_kind).await
    }
}
