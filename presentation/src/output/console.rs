//! Console output formatter for gate results

use crate::output::formatter::OutputFormatter;
use colored::{ColoredString, Colorize};
use estate_quorum_application::{
    EvaluateOutput, GateConfigView, PendingSubject, SubjectStatusReport, SubmitOutput,
    ViewerState,
};
use estate_quorum_domain::{
    ChecklistTally, DecisionSubject, Evaluation, PollTally, QuorumConfig, SubjectStatus,
    Transition,
};

/// Formats gate results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the full status report of a subject
    pub fn format_status(report: &SubjectStatusReport) -> String {
        let mut output = String::new();
        let subject = &report.subject;

        output.push_str(&Self::header(&format!(
            "Subject #{} - {}",
            subject.id, subject.gate_kind
        )));
        output.push('\n');

        output.push_str(&Self::field("Loan:", &subject.loan_id.to_string()));
        output.push_str(&format!(
            "{} {}\n",
            "Status:".cyan().bold(),
            Self::status_label(report.status)
        ));
        if report.projected != report.status {
            output.push_str(&format!(
                "{} {} {}\n",
                "Projected:".cyan().bold(),
                Self::status_label(report.projected),
                "(run `evaluate` to apply)".dimmed()
            ));
        }
        output.push_str(&Self::field(
            "Required:",
            &format!("{}, pool of {}", report.required_threshold, report.pool_size),
        ));
        if report.closed_for_submissions {
            output.push_str(&format!(
                "{}\n",
                "Loan is paid out; no further input is accepted".yellow()
            ));
        }

        match &report.evaluation {
            Evaluation::Poll(tally) => output.push_str(&Self::poll_breakdown(tally)),
            Evaluation::Checklist(tally) => {
                output.push_str(&Self::checklist_breakdown(tally, report.viewer.as_ref()))
            }
        }

        if let Some(viewer) = &report.viewer {
            output.push_str(&Self::viewer_line(viewer));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format the result of a submission
    pub fn format_submit(result: &SubmitOutput) -> String {
        let mut output = String::new();
        let verb = if result.replaced {
            "Submission replaced"
        } else {
            "Submission recorded"
        };
        output.push_str(&format!(
            "{} for subject #{} by {}\n",
            verb.green().bold(),
            result.submission.subject_id,
            result.submission.approver_id
        ));
        output.push_str(&Self::outcome(
            result.status,
            result.transition,
            &result.evaluation,
        ));
        if result.effects.ready_for_payout_marked {
            output.push_str(&format!("{}\n", "Loan marked ready for payout".green()));
        }
        if let Some(checklist) = result.effects.checklist_subject {
            output.push_str(&format!("Payout checklist: subject #{}\n", checklist));
        }
        output
    }

    /// Format the result of an explicit evaluation
    pub fn format_evaluation(result: &EvaluateOutput) -> String {
        let mut output = format!(
            "{} #{} ({})\n",
            "Evaluated subject".cyan().bold(),
            result.subject.id,
            result.subject.gate_kind
        );
        output.push_str(&Self::outcome(
            result.status(),
            result.transition,
            &result.evaluation,
        ));
        if result.effects.ready_for_payout_marked {
            output.push_str(&format!("{}\n", "Loan marked ready for payout".green()));
        }
        if let Some(checklist) = result.effects.checklist_subject {
            output.push_str(&format!("Payout checklist: subject #{}\n", checklist));
        }
        output
    }

    pub fn format_pending(subjects: &[PendingSubject]) -> String {
        if subjects.is_empty() {
            return format!("{}\n", "No subjects waiting for input".dimmed());
        }

        let mut output = Self::section_header("Waiting for input");
        for pending in subjects {
            let mark = if pending.viewer_has_submitted {
                "submitted".green()
            } else {
                "".normal()
            };
            output.push_str(&format!(
                "  #{:<5} loan {:<8} {:<18} {:>3} submission(s) {}\n",
                pending.subject.id,
                pending.subject.loan_id,
                pending.subject.gate_kind.to_string(),
                pending.submissions,
                mark
            ));
        }
        output
    }

    pub fn format_subject(subject: &DecisionSubject) -> String {
        format!(
            "{} #{} for loan {} at {} ({})\n",
            "Subject".cyan().bold(),
            subject.id,
            subject.loan_id,
            subject.gate_kind,
            Self::status_label(subject.status)
        )
    }

    pub fn format_gate_config(view: &GateConfigView, history: &[QuorumConfig]) -> String {
        let mut output = Self::section_header(&format!("{} configuration", view.gate_kind));
        output.push_str(&Self::field("Active:", &view.config.to_string()));
        output.push_str(&Self::field("Policy:", &view.gate_kind.policy().to_string()));
        output.push_str(&Self::field("Pool group:", view.pool_group.as_str()));

        if !view.active_items.is_empty() {
            output.push_str(&format!("{}\n", "Active items:".cyan().bold()));
            for item in &view.active_items {
                output.push_str(&format!("  {:>4}  {}\n", item.id, item.title));
                if !item.description.is_empty() {
                    output.push_str(&format!("{}\n", Self::indent(&item.description, "        ").as_str().dimmed()));
                }
            }
        }

        if !history.is_empty() {
            output.push_str(&format!("{}\n", "History:".cyan().bold()));
            for config in history {
                let marker = if config.active { "*" } else { " " };
                output.push_str(&format!(
                    "  {} #{:<4} {:<24} {}\n",
                    marker,
                    config.id,
                    config.required_approvers.to_string(),
                    config.created_at.format("%Y-%m-%d %H:%M")
                ));
            }
        }
        output
    }

    pub fn format_record(title: &str, value: &serde_json::Value) -> String {
        let mut output = format!("{}\n", title.green().bold());
        if let Some(map) = value.as_object() {
            for (key, value) in map {
                let rendered = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                output.push_str(&format!("  {:<20} {}\n", format!("{}:", key).as_str().dimmed(), rendered));
            }
        }
        output
    }

    fn outcome(
        status: SubjectStatus,
        transition: Option<Transition>,
        evaluation: &Evaluation,
    ) -> String {
        let progress = match evaluation {
            Evaluation::Poll(tally) => format!(
                "{} {}/{} voted, {} approval(s)",
                tally.vote_summary(),
                tally.votes_cast(),
                tally.pool_size,
                tally.approvals
            ),
            Evaluation::Checklist(tally) => format!(
                "{}/{} item(s) satisfied",
                tally.satisfied_items(),
                tally.items.len()
            ),
        };
        match transition {
            Some(transition) => format!(
                "{} {} -> {}  {}\n",
                "Status changed:".yellow().bold(),
                Self::status_label(transition.from),
                Self::status_label(transition.to),
                progress.as_str().dimmed()
            ),
            None => format!(
                "{} {}  {}\n",
                "Status:".cyan().bold(),
                Self::status_label(status),
                progress.as_str().dimmed()
            ),
        }
    }

    fn poll_breakdown(tally: &PollTally) -> String {
        let mut output = Self::section_header("Votes");
        output.push_str(&format!(
            "{}  {} approve, {} reject, {} awaiting\n",
            tally.vote_summary(),
            tally.approvals,
            tally.rejections,
            tally.awaiting.len()
        ));
        for ballot in &tally.ballots {
            let decision = match ballot.decision {
                estate_quorum_domain::Decision::Approve => "approve".green(),
                estate_quorum_domain::Decision::Reject => "reject".red(),
            };
            let note = if ballot.counted {
                "".normal()
            } else {
                "(no longer in pool, not counted)".dimmed()
            };
            output.push_str(&format!(
                "  {:<20} {:<8} {} {}\n",
                ballot.approver_id.as_str(),
                decision,
                ballot.submitted_at.format("%Y-%m-%d %H:%M"),
                note
            ));
        }
        if !tally.awaiting.is_empty() {
            let names: Vec<_> = tally.awaiting.iter().map(|a| a.as_str()).collect();
            output.push_str(&format!("{} {}\n", "Awaiting:".dimmed(), names.join(", ")));
        }
        output
    }

    fn checklist_breakdown(tally: &ChecklistTally, viewer: Option<&ViewerState>) -> String {
        let own_sheet = viewer
            .and_then(|v| v.submission.as_ref())
            .and_then(|s| s.payload.checklist());

        let mut output = Self::section_header("Items");
        if tally.items.is_empty() {
            output.push_str(&format!("{}\n", "No active checklist items".yellow()));
        }
        for item in &tally.items {
            let mark = if item.satisfied {
                "[✓]".green()
            } else {
                "[ ]".normal()
            };
            let mine = match own_sheet {
                Some(sheet) if sheet.is_checked(item.item.id) => " (you)".cyan(),
                _ => "".normal(),
            };
            let names: Vec<_> = item.checked_by.iter().map(|a| a.as_str()).collect();
            output.push_str(&format!(
                "  {} {:>4}  {:<36} {}/{}{}  {}\n",
                mark,
                item.item.id,
                item.item.title,
                item.count(),
                tally.required.get(),
                mine,
                names.join(", ").as_str().dimmed()
            ));
        }

        if !tally.approvers.is_empty() {
            output.push_str(&Self::section_header("Submissions"));
            for progress in &tally.approvers {
                output.push_str(&format!(
                    "  {:<20} {}/{} checked  {}\n",
                    progress.approver_id.as_str(),
                    progress.checked_items.len(),
                    progress.total_items,
                    progress.submitted_at.format("%Y-%m-%d %H:%M")
                ));
                if !progress.notes.is_empty() {
                    output.push_str(&format!("{}\n", Self::indent(&progress.notes, "      ").as_str().dimmed()));
                }
            }
        }
        output
    }

    fn viewer_line(viewer: &ViewerState) -> String {
        if viewer.has_submitted {
            format!(
                "\n{} {} has a live submission\n",
                "Viewer:".cyan().bold(),
                viewer.approver_id
            )
        } else {
            format!(
                "\n{} {} has not submitted yet\n",
                "Viewer:".cyan().bold(),
                viewer.approver_id
            )
        }
    }

    fn status_label(status: SubjectStatus) -> ColoredString {
        match status {
            SubjectStatus::Pending => status.as_str().yellow(),
            SubjectStatus::Approved | SubjectStatus::Complete => status.as_str().green().bold(),
            SubjectStatus::Rejected => status.as_str().red().bold(),
        }
    }

    fn field(label: &str, value: &str) -> String {
        format!("{} {}\n", label.cyan().bold(), value)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn submit(&self, output: &SubmitOutput) -> String {
        Self::format_submit(output)
    }

    fn evaluation(&self, output: &EvaluateOutput) -> String {
        Self::format_evaluation(output)
    }

    fn status(&self, report: &SubjectStatusReport) -> String {
        Self::format_status(report)
    }

    fn pending(&self, subjects: &[PendingSubject]) -> String {
        Self::format_pending(subjects)
    }

    fn subject(&self, subject: &DecisionSubject) -> String {
        Self::format_subject(subject)
    }

    fn gate_config(&self, view: &GateConfigView, history: &[QuorumConfig]) -> String {
        Self::format_gate_config(view, history)
    }

    fn record(&self, title: &str, value: &serde_json::Value) -> String {
        Self::format_record(title, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use estate_quorum_domain::{
        ApproverId, ChecklistItem, Decision, GateKind, ItemId, LoanId, RequiredApprovers,
        SubjectId, Submission, SubmissionPayload, evaluate_checklist, evaluate_poll,
    };
    use std::collections::BTreeSet;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_status_report_lists_votes_and_awaiting_members() {
        plain();
        let pool: BTreeSet<_> = ["alice", "bob"].into_iter().map(ApproverId::new).collect();
        let votes = vec![Submission::new(
            SubjectId(1),
            ApproverId::new("alice"),
            SubmissionPayload::from(Decision::Approve),
            Utc::now(),
        )];
        let evaluation = Evaluation::Poll(evaluate_poll(&pool, &votes, RequiredApprovers::ONE));
        let report = SubjectStatusReport {
            subject: DecisionSubject::open(
                SubjectId(1),
                LoanId(42),
                GateKind::CommitteeApproval,
                Utc::now(),
            ),
            status: SubjectStatus::Pending,
            projected: SubjectStatus::Pending,
            required_threshold: RequiredApprovers::ONE,
            pool_size: 2,
            closed_for_submissions: false,
            evaluation,
            viewer: None,
        };

        let out = ConsoleFormatter::format_status(&report);
        assert!(out.contains("Subject #1 - committee approval"));
        assert!(out.contains("[●·]"));
        assert!(out.contains("alice"));
        assert!(out.contains("Awaiting: bob"));
        assert!(!out.contains("Projected:"));
    }

    #[test]
    fn test_status_report_marks_viewer_checks() {
        plain();
        let items = vec![ChecklistItem::new(ItemId(1), "Probate granted")];
        let sheet = Submission::new(
            SubjectId(2),
            ApproverId::new("bob"),
            SubmissionPayload::from(estate_quorum_domain::ChecklistPayload::new().check(ItemId(1))),
            Utc::now(),
        );
        let tally = evaluate_checklist(
            &items,
            std::slice::from_ref(&sheet),
            RequiredApprovers::new(2).unwrap(),
        );
        let report = SubjectStatusReport {
            subject: DecisionSubject::open(
                SubjectId(2),
                LoanId(42),
                GateKind::PayoutChecklist,
                Utc::now(),
            ),
            status: SubjectStatus::Pending,
            projected: SubjectStatus::Pending,
            required_threshold: RequiredApprovers::new(2).unwrap(),
            pool_size: 3,
            closed_for_submissions: true,
            evaluation: Evaluation::Checklist(tally),
            viewer: Some(ViewerState {
                approver_id: ApproverId::new("bob"),
                has_submitted: true,
                submission: Some(sheet),
            }),
        };

        let out = ConsoleFormatter::format_status(&report);
        assert!(out.contains("Probate granted"));
        assert!(out.contains("1/2 (you)"));
        assert!(out.contains("paid out"));
        assert!(out.contains("bob has a live submission"));
    }

    #[test]
    fn test_empty_pending_list() {
        plain();
        assert!(ConsoleFormatter::format_pending(&[]).contains("No subjects"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
