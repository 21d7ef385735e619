//! Presentation layer for estate-quorum
//!
//! This crate contains CLI definitions and output formatters.

pub mod cli;
pub mod output;

// Re-export commonly used types
pub use cli::commands::{
    Cli, Command, ConfigCommand, GateArg, ItemCommand, LoanCommand, MemberCommand, OutputFormat,
    SubjectCommand, SubmitCommand, SubmitTarget, VoteArg,
};
pub use output::console::ConsoleFormatter;
pub use output::formatter::{OutputFormatter, formatter_for};
pub use output::json::JsonFormatter;
