//! Notifier that emits transitions as structured `tracing` events.

use async_trait::async_trait;
use estate_quorum_application::{NotifyError, TransitionEvent, TransitionNotifier};
use tracing::info;

/// Default notifier when no outbox is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTransitionNotifier;

#[async_trait]
impl TransitionNotifier for TracingTransitionNotifier {
    async fn notify(&self, event: &TransitionEvent) -> Result<(), NotifyError> {
        info!(
            target: "estate_quorum::notify",
            subject = %event.subject_id,
            loan = %event.loan_id,
            gate = %event.gate_kind,
            old = %event.old,
            new = %event.new,
            triggered_by = event.triggered_by.as_ref().map(|a| a.as_str()),
            "{}",
            event.message()
        );
        Ok(())
    }
}
