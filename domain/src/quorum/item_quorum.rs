//! Item-level quorum policy (payout checklist)
//!
//! Each active item needs its own set of distinct checking approvers, so the
//! gate models an N-eyes review of every risk factor rather than N submissions.

use super::threshold::RequiredApprovers;
use crate::checklist::ChecklistItem;
use crate::core::ids::{ApproverId, ItemId};
use crate::gate::SubjectStatus;
use crate::submission::Submission;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Per-item evaluation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTally {
    pub item: ChecklistItem,
    /// Approvers whose live submission marks this item checked
    pub checked_by: BTreeSet<ApproverId>,
    pub satisfied: bool,
}

impl ItemTally {
    pub fn count(&self) -> usize {
        self.checked_by.len()
    }
}

/// Per-approver progress over the active items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApproverProgress {
    pub approver_id: ApproverId,
    pub submitted_at: DateTime<Utc>,
    pub checked_items: Vec<ItemId>,
    pub total_items: usize,
    pub notes: String,
}

/// Result of evaluating a payout checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistTally {
    pub required: RequiredApprovers,
    pub items: Vec<ItemTally>,
    pub approvers: Vec<ApproverProgress>,
}

impl ChecklistTally {
    /// Complete iff there is at least one active item and all are satisfied
    pub fn is_complete(&self) -> bool {
        !self.items.is_empty() && self.items.iter().all(|i| i.satisfied)
    }

    pub fn status(&self) -> SubjectStatus {
        if self.is_complete() {
            SubjectStatus::Complete
        } else {
            SubjectStatus::Pending
        }
    }

    pub fn satisfied_items(&self) -> usize {
        self.items.iter().filter(|i| i.satisfied).count()
    }

    pub fn item(&self, id: ItemId) -> Option<&ItemTally> {
        self.items.iter().find(|i| i.item.id == id)
    }
}

/// Evaluate the checklist from the active items and the live submissions
///
/// Inactive items passed in are skipped; checks of items that are not in the
/// active set are ignored.
pub fn evaluate_checklist(
    active_items: &[ChecklistItem],
    submissions: &[Submission],
    required: RequiredApprovers,
) -> ChecklistTally {
    let sheets: Vec<_> = submissions
        .iter()
        .filter_map(|s| s.payload.checklist().map(|sheet| (s, sheet)))
        .collect();

    let items: Vec<ItemTally> = active_items
        .iter()
        .filter(|item| item.is_active)
        .map(|item| {
            let checked_by: BTreeSet<ApproverId> = sheets
                .iter()
                .filter(|(_, sheet)| sheet.is_checked(item.id))
                .map(|(submission, _)| submission.approver_id.clone())
                .collect();
            let satisfied = required.is_satisfied(checked_by.len());
            ItemTally {
                item: item.clone(),
                checked_by,
                satisfied,
            }
        })
        .collect();

    let approvers = sheets
        .iter()
        .map(|(submission, sheet)| ApproverProgress {
            approver_id: submission.approver_id.clone(),
            submitted_at: submission.created_at,
            checked_items: items
                .iter()
                .map(|i| i.item.id)
                .filter(|id| sheet.is_checked(*id))
                .collect(),
            total_items: items.len(),
            notes: sheet.notes.clone(),
        })
        .collect();

    ChecklistTally {
        required,
        items,
        approvers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::SubjectId;
    use crate::submission::{ChecklistPayload, SubmissionPayload};

    fn items(ids: &[u64]) -> Vec<ChecklistItem> {
        ids.iter()
            .map(|id| ChecklistItem::new(ItemId(*id), format!("item {id}")))
            .collect()
    }

    fn sheet(approver: &str, checked: &[u64], unchecked: &[u64]) -> Submission {
        let mut payload = ChecklistPayload::new();
        for id in checked {
            payload = payload.check(ItemId(*id));
        }
        for id in unchecked {
            payload = payload.uncheck(ItemId(*id));
        }
        Submission::new(
            SubjectId(1),
            ApproverId::new(approver),
            SubmissionPayload::from(payload),
            Utc::now(),
        )
    }

    fn threshold(n: usize) -> RequiredApprovers {
        RequiredApprovers::new(n).unwrap()
    }

    #[test]
    fn test_item_satisfied_by_distinct_approvers() {
        let active = items(&[1]);
        let one = evaluate_checklist(&active, &[sheet("a", &[1], &[])], threshold(2));
        assert!(!one.items[0].satisfied);
        assert_eq!(one.status(), SubjectStatus::Pending);

        let two = evaluate_checklist(
            &active,
            &[sheet("a", &[1], &[]), sheet("b", &[1], &[])],
            threshold(2),
        );
        assert!(two.items[0].satisfied);
        assert_eq!(two.status(), SubjectStatus::Complete);
    }

    #[test]
    fn test_unchecking_drops_item_below_threshold() {
        let active = items(&[1]);
        let tally = evaluate_checklist(
            &active,
            &[sheet("a", &[1], &[]), sheet("b", &[], &[1])],
            threshold(2),
        );
        assert_eq!(tally.items[0].count(), 1);
        assert_eq!(tally.status(), SubjectStatus::Pending);
    }

    #[test]
    fn test_every_active_item_must_be_satisfied() {
        let active = items(&[1, 2]);
        let tally = evaluate_checklist(
            &active,
            &[sheet("a", &[1, 2], &[]), sheet("b", &[1], &[])],
            threshold(2),
        );
        assert_eq!(tally.satisfied_items(), 1);
        assert_eq!(tally.status(), SubjectStatus::Pending);
    }

    #[test]
    fn test_deactivated_item_is_left_out() {
        let mut active = items(&[1, 2]);
        active[1] = active[1].clone().inactive();
        let tally = evaluate_checklist(
            &active,
            &[sheet("a", &[1], &[]), sheet("b", &[1], &[])],
            threshold(2),
        );
        assert_eq!(tally.items.len(), 1);
        assert_eq!(tally.status(), SubjectStatus::Complete);
    }

    #[test]
    fn test_empty_active_set_is_never_complete() {
        let tally = evaluate_checklist(&[], &[sheet("a", &[1], &[])], threshold(1));
        assert_eq!(tally.status(), SubjectStatus::Pending);
    }

    #[test]
    fn test_approver_progress() {
        let active = items(&[1, 2, 3]);
        let tally = evaluate_checklist(&active, &[sheet("a", &[1, 3, 99], &[2])], threshold(1));
        let progress = &tally.approvers[0];
        assert_eq!(progress.checked_items, vec![ItemId(1), ItemId(3)]);
        assert_eq!(progress.total_items, 3);
    }
}
