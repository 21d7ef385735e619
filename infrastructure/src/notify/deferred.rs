//! Notifier that holds transitions until the state carrying them is durable.
//!
//! The use cases notify right after the in-memory status write, but the CLI
//! only commits when the snapshot is saved. Events queue here and reach the
//! real notifier through [`DeferredTransitionNotifier::deliver`] once the save
//! succeeded, or are thrown away with [`DeferredTransitionNotifier::discard`].

use async_trait::async_trait;
use estate_quorum_application::{NotifyError, TransitionEvent, TransitionNotifier};
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

pub struct DeferredTransitionNotifier {
    inner: Arc<dyn TransitionNotifier>,
    queue: Mutex<Vec<TransitionEvent>>,
}

impl DeferredTransitionNotifier {
    pub fn new(inner: Arc<dyn TransitionNotifier>) -> Self {
        Self {
            inner,
            queue: Mutex::new(Vec::new()),
        }
    }

    /// Number of queued transitions
    pub fn pending(&self) -> usize {
        self.queue.lock().map(|q| q.len()).unwrap_or_default()
    }

    /// Hand every queued transition to the wrapped notifier, in order.
    ///
    /// Failures are logged and skipped. Returns how many were delivered.
    pub async fn deliver(&self) -> usize {
        let events = self.take();
        let mut delivered = 0;
        for event in &events {
            match self.inner.notify(event).await {
                Ok(()) => delivered += 1,
                Err(e) => warn!(
                    subject = %event.subject_id,
                    new = %event.new,
                    "Transition notification failed, status change stands: {}",
                    e
                ),
            }
        }
        debug!(delivered, queued = events.len(), "Delivered deferred notifications");
        delivered
    }

    /// Drop every queued transition. Returns how many were dropped.
    pub fn discard(&self) -> usize {
        self.take().len()
    }

    fn take(&self) -> Vec<TransitionEvent> {
        match self.queue.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

#[async_trait]
impl TransitionNotifier for DeferredTransitionNotifier {
    async fn notify(&self, event: &TransitionEvent) -> Result<(), NotifyError> {
        self.queue
            .lock()
            .map_err(|_| NotifyError::Unavailable)?
            .push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use estate_quorum_domain::{
        DecisionSubject, GateKind, LoanId, SubjectId, SubjectStatus, Transition,
    };

    #[derive(Default)]
    struct Collect {
        seen: Mutex<Vec<SubjectId>>,
    }

    #[async_trait]
    impl TransitionNotifier for Collect {
        async fn notify(&self, event: &TransitionEvent) -> Result<(), NotifyError> {
            self.seen.lock().unwrap().push(event.subject_id);
            Ok(())
        }
    }

    struct Refuse;

    #[async_trait]
    impl TransitionNotifier for Refuse {
        async fn notify(&self, _event: &TransitionEvent) -> Result<(), NotifyError> {
            Err(NotifyError::Unavailable)
        }
    }

    fn event(subject: u64) -> TransitionEvent {
        let subject = DecisionSubject::open(
            SubjectId(subject),
            LoanId(9),
            GateKind::PayoutChecklist,
            Utc::now(),
        );
        let transition =
            Transition::between(SubjectStatus::Pending, SubjectStatus::Complete).unwrap();
        TransitionEvent::new(&subject, transition, serde_json::Value::Null)
    }

    #[tokio::test]
    async fn test_events_wait_for_delivery() {
        let sink = Arc::new(Collect::default());
        let deferred = DeferredTransitionNotifier::new(sink.clone());

        deferred.notify(&event(1)).await.unwrap();
        deferred.notify(&event(2)).await.unwrap();
        assert!(sink.seen.lock().unwrap().is_empty());
        assert_eq!(deferred.pending(), 2);

        assert_eq!(deferred.deliver().await, 2);
        assert_eq!(*sink.seen.lock().unwrap(), vec![SubjectId(1), SubjectId(2)]);
        assert_eq!(deferred.pending(), 0);
    }

    #[tokio::test]
    async fn test_discarded_events_never_arrive() {
        let sink = Arc::new(Collect::default());
        let deferred = DeferredTransitionNotifier::new(sink.clone());

        deferred.notify(&event(1)).await.unwrap();
        assert_eq!(deferred.discard(), 1);
        assert_eq!(deferred.deliver().await, 0);
        assert!(sink.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delivery_failures_are_not_counted() {
        let deferred = DeferredTransitionNotifier::new(Arc::new(Refuse));
        deferred.notify(&event(1)).await.unwrap();

        assert_eq!(deferred.deliver().await, 0);
        assert_eq!(deferred.pending(), 0);
    }
}
