//! One command's exclusive window over a snapshot.
//!
//! ```text
//! lock snapshot → load → use cases (notifications queued) → save → deliver → unlock
//! ```
//!
//! The snapshot lock makes the per-subject serialization of the use cases
//! hold across processes, and queued notifications only go out once the
//! transition they announce has been written to disk.

use super::memory::InMemoryGateStore;
use super::snapshot::{SnapshotError, SnapshotFile, SnapshotLock};
use crate::notify::DeferredTransitionNotifier;
use estate_quorum_application::{GateContext, TransitionNotifier};
use std::sync::Arc;
use tracing::{debug, warn};

pub struct StateSession {
    snapshot: SnapshotFile,
    store: Arc<InMemoryGateStore>,
    outbox: Arc<DeferredTransitionNotifier>,
    _lock: SnapshotLock,
}

impl StateSession {
    /// Take the snapshot lock and load the state behind it.
    ///
    /// Blocks while another session holds the same snapshot.
    pub fn open(
        snapshot: SnapshotFile,
        notifier: Arc<dyn TransitionNotifier>,
    ) -> Result<Self, SnapshotError> {
        let lock = snapshot.lock()?;
        let store = Arc::new(InMemoryGateStore::from_state(snapshot.load()?));
        debug!("Loaded state from {}", snapshot.path().display());

        Ok(Self {
            snapshot,
            store,
            outbox: Arc::new(DeferredTransitionNotifier::new(notifier)),
            _lock: lock,
        })
    }

    pub fn store(&self) -> Arc<InMemoryGateStore> {
        Arc::clone(&self.store)
    }

    /// Use-case context over this session's store, notifying through the queue
    pub fn context(&self) -> GateContext {
        GateContext::from_store(self.store()).with_notifier(self.outbox.clone())
    }

    pub fn snapshot(&self) -> &SnapshotFile {
        &self.snapshot
    }

    /// Save the state, then deliver the queued notifications.
    ///
    /// On a failed save nothing is delivered. Returns how many notifications
    /// were delivered.
    pub async fn commit(self) -> Result<usize, SnapshotError> {
        let saved = self
            .store
            .snapshot()
            .map_err(SnapshotError::from)
            .and_then(|state| self.snapshot.save(&state));

        if let Err(e) = saved {
            let dropped = self.outbox.discard();
            if dropped > 0 {
                warn!(dropped, "Snapshot not saved, dropping transition notifications");
            }
            return Err(e);
        }

        Ok(self.outbox.deliver().await)
    }
}

impl Drop for StateSession {
    fn drop(&mut self) {
        let dropped = self.outbox.discard();
        if dropped > 0 {
            warn!(dropped, "Session closed without commit, dropping transition notifications");
        }
    }
}
