//! Unanimous-poll threshold policy (committee approval)
//!
//! Every member of the current pool has to vote before the poll decides, so a
//! lopsided partial vote is never mistaken for a final one. Once everyone has
//! voted the subject is approved iff the approvals reach the threshold.
//!
//! Votes from approvers who are no longer in the pool are kept in the ledger
//! but do not count: `approvals + rejections <= pool size` always holds.

use super::threshold::RequiredApprovers;
use crate::core::ids::ApproverId;
use crate::gate::SubjectStatus;
use crate::submission::{Decision, Submission};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// One live vote as seen by the evaluator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ballot {
    pub approver_id: ApproverId,
    pub decision: Decision,
    pub submitted_at: DateTime<Utc>,
    /// Whether the approver is in the current pool and the vote is tallied
    pub counted: bool,
}

/// Result of evaluating a committee poll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollTally {
    pub pool_size: usize,
    pub required: RequiredApprovers,
    pub approvals: usize,
    pub rejections: usize,
    pub ballots: Vec<Ballot>,
    /// Pool members without a live vote
    pub awaiting: Vec<ApproverId>,
}

impl PollTally {
    pub fn votes_cast(&self) -> usize {
        self.approvals + self.rejections
    }

    /// The poll is complete once every current pool member has voted
    pub fn is_complete(&self) -> bool {
        self.pool_size > 0 && self.votes_cast() >= self.pool_size
    }

    pub fn status(&self) -> SubjectStatus {
        if !self.is_complete() {
            SubjectStatus::Pending
        } else if self.required.is_satisfied(self.approvals) {
            SubjectStatus::Approved
        } else {
            SubjectStatus::Rejected
        }
    }

    /// Votes that are kept but not tallied (approver left the pool)
    pub fn stale_ballots(&self) -> impl Iterator<Item = &Ballot> {
        self.ballots.iter().filter(|b| !b.counted)
    }

    /// Visual vote summary, e.g. `[●○·]` (approve, reject, awaiting)
    pub fn vote_summary(&self) -> String {
        let mut summary = String::from("[");
        summary.extend(std::iter::repeat_n('●', self.approvals));
        summary.extend(std::iter::repeat_n('○', self.rejections));
        summary.extend(std::iter::repeat_n('·', self.awaiting.len()));
        summary.push(']');
        summary
    }
}

/// Evaluate the poll from the current pool and the live submissions
///
/// Submissions without a committee decision are ignored.
pub fn evaluate_poll(
    pool: &BTreeSet<ApproverId>,
    submissions: &[Submission],
    required: RequiredApprovers,
) -> PollTally {
    let mut approvals = 0;
    let mut rejections = 0;
    let mut voted = BTreeSet::new();
    let mut ballots = Vec::with_capacity(submissions.len());

    for submission in submissions {
        let Some(decision) = submission.payload.decision() else {
            continue;
        };
        let counted = pool.contains(&submission.approver_id)
            && voted.insert(submission.approver_id.clone());
        if counted {
            match decision {
                Decision::Approve => approvals += 1,
                Decision::Reject => rejections += 1,
            }
        }
        ballots.push(Ballot {
            approver_id: submission.approver_id.clone(),
            decision,
            submitted_at: submission.created_at,
            counted,
        });
    }

    let awaiting = pool.difference(&voted).cloned().collect();

    PollTally {
        pool_size: pool.len(),
        required,
        approvals,
        rejections,
        ballots,
        awaiting,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::SubjectId;
    use crate::submission::SubmissionPayload;

    fn pool(names: &[&str]) -> BTreeSet<ApproverId> {
        names.iter().map(|n| ApproverId::new(*n)).collect()
    }

    fn vote(approver: &str, decision: Decision) -> Submission {
        Submission::new(
            SubjectId(1),
            ApproverId::new(approver),
            SubmissionPayload::from(decision),
            Utc::now(),
        )
    }

    fn threshold(n: usize) -> RequiredApprovers {
        RequiredApprovers::new(n).unwrap()
    }

    #[test]
    fn test_incomplete_poll_is_pending_regardless_of_distribution() {
        let members = pool(&["a", "b", "c"]);

        let all_approve = vec![vote("a", Decision::Approve), vote("b", Decision::Approve)];
        let tally = evaluate_poll(&members, &all_approve, threshold(2));
        assert_eq!(tally.approvals, 2);
        assert_eq!(tally.status(), SubjectStatus::Pending);

        let all_reject = vec![vote("a", Decision::Reject), vote("b", Decision::Reject)];
        let tally = evaluate_poll(&members, &all_reject, threshold(2));
        assert_eq!(tally.status(), SubjectStatus::Pending);
    }

    #[test]
    fn test_complete_poll_decides_on_threshold() {
        let members = pool(&["a", "b", "c"]);
        let votes = vec![
            vote("a", Decision::Approve),
            vote("b", Decision::Reject),
            vote("c", Decision::Approve),
        ];

        assert_eq!(
            evaluate_poll(&members, &votes, threshold(2)).status(),
            SubjectStatus::Approved
        );
        assert_eq!(
            evaluate_poll(&members, &votes, threshold(3)).status(),
            SubjectStatus::Rejected
        );
    }

    #[test]
    fn test_stale_votes_do_not_count() {
        let members = pool(&["a", "b"]);
        let votes = vec![
            vote("a", Decision::Approve),
            vote("departed", Decision::Approve),
        ];
        let tally = evaluate_poll(&members, &votes, threshold(1));

        assert_eq!(tally.approvals, 1);
        assert_eq!(tally.votes_cast(), 1);
        assert_eq!(tally.status(), SubjectStatus::Pending);
        assert_eq!(tally.awaiting, vec![ApproverId::new("b")]);
        assert_eq!(tally.stale_ballots().count(), 1);
    }

    #[test]
    fn test_departed_member_does_not_stall_poll() {
        // "c" voted and left; the remaining pool has fully voted.
        let members = pool(&["a", "b"]);
        let votes = vec![
            vote("a", Decision::Approve),
            vote("b", Decision::Approve),
            vote("c", Decision::Reject),
        ];
        let tally = evaluate_poll(&members, &votes, threshold(2));
        assert_eq!(tally.status(), SubjectStatus::Approved);
        assert_eq!(tally.rejections, 0);
    }

    #[test]
    fn test_empty_pool_stays_pending() {
        let tally = evaluate_poll(&BTreeSet::new(), &[vote("x", Decision::Reject)], threshold(1));
        assert_eq!(tally.status(), SubjectStatus::Pending);
    }

    #[test]
    fn test_checklist_submissions_are_ignored() {
        let members = pool(&["a"]);
        let submissions = vec![Submission::new(
            SubjectId(1),
            ApproverId::new("a"),
            SubmissionPayload::Checklist(Default::default()),
            Utc::now(),
        )];
        let tally = evaluate_poll(&members, &submissions, threshold(1));
        assert!(tally.ballots.is_empty());
        assert_eq!(tally.status(), SubjectStatus::Pending);
    }

    #[test]
    fn test_vote_summary() {
        let members = pool(&["a", "b", "c"]);
        let votes = vec![vote("a", Decision::Approve), vote("b", Decision::Reject)];
        let tally = evaluate_poll(&members, &votes, threshold(2));
        assert_eq!(tally.vote_summary(), "[●○·]");
    }
}
