//! Output formatter trait

use crate::cli::commands::OutputFormat;
use estate_quorum_application::{
    EvaluateOutput, GateConfigView, PendingSubject, SubjectStatusReport, SubmitOutput,
};
use estate_quorum_domain::{DecisionSubject, QuorumConfig};

/// Trait for formatting command results
pub trait OutputFormatter {
    fn submit(&self, output: &SubmitOutput) -> String;

    fn evaluation(&self, output: &EvaluateOutput) -> String;

    fn status(&self, report: &SubjectStatusReport) -> String;

    fn pending(&self, subjects: &[PendingSubject]) -> String;

    fn subject(&self, subject: &DecisionSubject) -> String;

    fn gate_config(&self, view: &GateConfigView, history: &[QuorumConfig]) -> String;

    /// Administrative results without a dedicated layout
    fn record(&self, title: &str, value: &serde_json::Value) -> String;
}

/// Select the formatter for an output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(super::console::ConsoleFormatter),
        OutputFormat::Json => Box::new(super::json::JsonFormatter),
    }
}
