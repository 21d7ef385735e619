//! JSONL outbox for transition notifications.
//!
//! Each [`TransitionEvent`] is serialized as a single JSON line with a
//! `type`, `message` and `timestamp` field, appended to the outbox file via a
//! buffered writer. A mail or chat relay can tail the file.

use async_trait::async_trait;
use estate_quorum_application::{NotifyError, TransitionEvent, TransitionNotifier};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Notifier that appends one JSON object per transition.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes after every event and on `Drop`.
pub struct JsonlTransitionNotifier {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTransitionNotifier {
    /// Open the outbox for appending.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create notification outbox directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open notification outbox {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the outbox file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: &TransitionEvent) -> Result<String, NotifyError> {
        let mut record =
            serde_json::to_value(event).map_err(|e| NotifyError::Delivery(e.to_string()))?;
        if let serde_json::Value::Object(map) = &mut record {
            map.insert(
                "type".to_string(),
                serde_json::Value::String("subject_transition".to_string()),
            );
            map.insert(
                "message".to_string(),
                serde_json::Value::String(event.message()),
            );
            map.insert(
                "timestamp".to_string(),
                serde_json::Value::String(
                    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
                ),
            );
        }
        serde_json::to_string(&record).map_err(|e| NotifyError::Delivery(e.to_string()))
    }
}

#[async_trait]
impl TransitionNotifier for JsonlTransitionNotifier {
    async fn notify(&self, event: &TransitionEvent) -> Result<(), NotifyError> {
        let line = Self::record(event)?;
        let mut writer = self.writer.lock().map_err(|_| NotifyError::Unavailable)?;
        writeln!(writer, "{}", line)
            .and_then(|_| writer.flush())
            .map_err(|e| NotifyError::Delivery(e.to_string()))
    }
}

impl Drop for JsonlTransitionNotifier {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use estate_quorum_domain::{
        DecisionSubject, GateKind, LoanId, SubjectId, SubjectStatus, Transition,
    };

    fn event(gate: GateKind, to: SubjectStatus) -> TransitionEvent {
        let subject = DecisionSubject::open(SubjectId(3), LoanId(12), gate, Utc::now());
        let transition = Transition::between(SubjectStatus::Pending, to).unwrap();
        TransitionEvent::new(&subject, transition, serde_json::json!({"approvals": 2}))
    }

    #[tokio::test]
    async fn test_outbox_appends_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("outbox.jsonl");

        let notifier = JsonlTransitionNotifier::new(&path).unwrap();
        notifier
            .notify(&event(GateKind::CommitteeApproval, SubjectStatus::Approved))
            .await
            .unwrap();
        drop(notifier);

        // Reopening appends instead of truncating
        let notifier = JsonlTransitionNotifier::new(&path).unwrap();
        notifier
            .notify(&event(GateKind::PayoutChecklist, SubjectStatus::Complete))
            .await
            .unwrap();
        drop(notifier);

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);

        assert_eq!(lines[0]["type"], "subject_transition");
        assert_eq!(lines[0]["old"], "pending");
        assert_eq!(lines[0]["new"], "approved");
        assert_eq!(lines[0]["metadata"]["approvals"], 2);
        assert!(lines[0]["timestamp"].is_string());
        assert_eq!(
            lines[1]["message"],
            "Advancement: 12 finance checklist is complete and the loan is ready for payout"
        );
    }
}
