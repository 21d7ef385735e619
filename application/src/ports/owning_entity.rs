//! Owning entity (loan) port
//!
//! The loan itself lives outside the engine. The engine asks it whether a
//! subject still accepts input and pushes the downstream effects of a decision
//! back to it.

use super::store::StoreError;
use async_trait::async_trait;
use estate_quorum_domain::{DecisionSubject, LoanId};

#[async_trait]
pub trait OwningEntityGate: Send + Sync {
    /// Whether the loan is in a state forbidding further input (e.g. paid out)
    async fn is_closed_for_submissions(&self, subject: &DecisionSubject) -> Result<bool, StoreError>;

    /// Set the loan's ready-for-payout flag if it is not already set
    ///
    /// Returns `true` only for the call that actually set the flag.
    async fn mark_ready_for_payout(&self, loan_id: LoanId) -> Result<bool, StoreError>;

    /// Mirror the latest committee decision onto the loan
    async fn record_committee_decision(
        &self,
        loan_id: LoanId,
        approved: bool,
    ) -> Result<(), StoreError>;
}
