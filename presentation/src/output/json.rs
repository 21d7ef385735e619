//! JSON output for scripting

use crate::output::formatter::OutputFormatter;
use estate_quorum_application::{
    EvaluateOutput, GateConfigView, PendingSubject, SubjectStatusReport, SubmitOutput,
};
use estate_quorum_domain::{DecisionSubject, QuorumConfig};
use serde::Serialize;

/// Formats results as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    fn to_json<T: Serialize + ?Sized>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn submit(&self, output: &SubmitOutput) -> String {
        Self::to_json(output)
    }

    fn evaluation(&self, output: &EvaluateOutput) -> String {
        Self::to_json(output)
    }

    fn status(&self, report: &SubjectStatusReport) -> String {
        Self::to_json(report)
    }

    fn pending(&self, subjects: &[PendingSubject]) -> String {
        Self::to_json(subjects)
    }

    fn subject(&self, subject: &DecisionSubject) -> String {
        Self::to_json(subject)
    }

    fn gate_config(&self, view: &GateConfigView, history: &[QuorumConfig]) -> String {
        Self::to_json(&serde_json::json!({
            "active": view,
            "history": history,
        }))
    }

    fn record(&self, title: &str, value: &serde_json::Value) -> String {
        Self::to_json(&serde_json::json!({ "result": title, "data": value }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use estate_quorum_domain::{GateKind, LoanId, SubjectId};

    #[test]
    fn test_subject_json() {
        let subject =
            DecisionSubject::open(SubjectId(5), LoanId(9), GateKind::PayoutChecklist, Utc::now());
        let value: serde_json::Value =
            serde_json::from_str(&JsonFormatter.subject(&subject)).unwrap();
        assert_eq!(value["id"], 5);
        assert_eq!(value["gate_kind"], "payout_checklist");
        assert_eq!(value["status"], "pending");
    }

    #[test]
    fn test_record_wraps_data() {
        let out = JsonFormatter.record("Loan registered", &serde_json::json!({"id": 3}));
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["result"], "Loan registered");
        assert_eq!(value["data"]["id"], 3);
    }
}
