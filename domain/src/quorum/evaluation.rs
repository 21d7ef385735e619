//! Policy-independent evaluation result

use super::item_quorum::ChecklistTally;
use super::poll::PollTally;
use super::threshold::RequiredApprovers;
use crate::gate::{Policy, SubjectStatus};
use serde::{Deserialize, Serialize};

/// Outcome of running a subject's policy over fresh inputs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Evaluation {
    Poll(PollTally),
    Checklist(ChecklistTally),
}

impl Evaluation {
    pub fn status(&self) -> SubjectStatus {
        match self {
            Evaluation::Poll(tally) => tally.status(),
            Evaluation::Checklist(tally) => tally.status(),
        }
    }

    pub fn policy(&self) -> Policy {
        match self {
            Evaluation::Poll(_) => Policy::UnanimousPoll,
            Evaluation::Checklist(_) => Policy::ItemQuorum,
        }
    }

    pub fn required(&self) -> RequiredApprovers {
        match self {
            Evaluation::Poll(tally) => tally.required,
            Evaluation::Checklist(tally) => tally.required,
        }
    }

    pub fn as_poll(&self) -> Option<&PollTally> {
        match self {
            Evaluation::Poll(tally) => Some(tally),
            Evaluation::Checklist(_) => None,
        }
    }

    pub fn as_checklist(&self) -> Option<&ChecklistTally> {
        match self {
            Evaluation::Checklist(tally) => Some(tally),
            Evaluation::Poll(_) => None,
        }
    }

    /// Compact counters for logs and notification metadata
    pub fn summary(&self) -> serde_json::Value {
        match self {
            Evaluation::Poll(tally) => serde_json::json!({
                "policy": "unanimous_poll",
                "pool_size": tally.pool_size,
                "approvals": tally.approvals,
                "rejections": tally.rejections,
                "required": tally.required.get(),
            }),
            Evaluation::Checklist(tally) => serde_json::json!({
                "policy": "item_quorum",
                "active_items": tally.items.len(),
                "satisfied_items": tally.satisfied_items(),
                "submissions": tally.approvers.len(),
                "required": tally.required.get(),
            }),
        }
    }
}
