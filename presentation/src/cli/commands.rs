//! CLI command definitions

use clap::{Args, Parser, Subcommand, ValueEnum};
use estate_quorum_domain::{Decision, GateKind};
use std::path::PathBuf;

/// Output format for command results
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Gate selector accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum GateArg {
    /// Committee approval (unanimous poll)
    Committee,
    /// Payout checklist (item-level quorum)
    Checklist,
}

impl From<GateArg> for GateKind {
    fn from(gate: GateArg) -> Self {
        match gate {
            GateArg::Committee => GateKind::CommitteeApproval,
            GateArg::Checklist => GateKind::PayoutChecklist,
        }
    }
}

/// Committee vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VoteArg {
    Approve,
    Reject,
}

impl From<VoteArg> for Decision {
    fn from(vote: VoteArg) -> Self {
        match vote {
            VoteArg::Approve => Decision::Approve,
            VoteArg::Reject => Decision::Reject,
        }
    }
}

/// CLI arguments for estate-quorum
#[derive(Parser, Debug)]
#[command(name = "estate-quorum")]
#[command(author, version, about = "Quorum approval gates for probate estate loans")]
#[command(long_about = r#"
estate-quorum guards two steps of an estate loan behind several staff sign-offs:

1. Committee approval: every committee member votes; once all have voted the
   loan is approved if approvals reach the configured threshold
2. Payout checklist: every active checklist item has to be checked by enough
   distinct staff members before the loan is ready for payout

Configuration files are loaded from (in priority order):
1. ESTATE_QUORUM_* environment variables
2. --config <path>          Explicit config file
3. ./estate-quorum.toml     Project-level config
4. ~/.config/estate-quorum/config.toml   Global config

Example:
  estate-quorum config set committee 3
  estate-quorum loan register 42 --amount 1500000
  estate-quorum submit vote 1 --approver alice approve
  estate-quorum submit checklist 2 --approver bob --check 1 --check 2
  estate-quorum status 2 --approver bob
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Loan administration
    #[command(subcommand)]
    Loan(LoanCommand),

    /// Open or list decision subjects
    #[command(subcommand)]
    Subject(SubjectCommand),

    /// Submit a committee vote or a checklist sheet
    #[command(subcommand)]
    Submit(SubmitCommand),

    /// Show the status and breakdown of a subject
    Status {
        /// Subject ID
        subject: u64,

        /// Show this approver's own submission
        #[arg(long, value_name = "ID")]
        approver: Option<String>,
    },

    /// Re-evaluate a subject (after pool, item or threshold changes)
    Evaluate {
        /// Subject ID
        subject: u64,
    },

    /// Quorum thresholds
    #[command(subcommand)]
    Config(ConfigCommand),

    /// Payout checklist items
    #[command(subcommand)]
    Item(ItemCommand),

    /// Approver group membership
    #[command(subcommand)]
    Member(MemberCommand),
}

#[derive(Subcommand, Debug)]
pub enum LoanCommand {
    /// Register a loan and open its first gate
    Register {
        /// Loan ID
        loan: u64,

        /// Agreed advance amount
        #[arg(long)]
        amount: u64,
    },

    /// Mark a loan as paid out; its gates stop accepting input
    PaidOut {
        /// Loan ID
        loan: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum SubjectCommand {
    /// Open (or fetch) the subject of a loan at a gate
    Open {
        /// Loan ID
        loan: u64,

        #[arg(value_enum)]
        gate: GateArg,
    },

    /// List subjects still waiting for input
    Pending {
        #[arg(long, value_enum)]
        gate: Option<GateArg>,

        /// Mark subjects this approver already submitted to
        #[arg(long, value_name = "ID")]
        approver: Option<String>,
    },
}

#[derive(Args, Debug)]
pub struct SubmitTarget {
    /// Subject ID
    pub subject: u64,

    /// Approver submitting
    #[arg(long, value_name = "ID")]
    pub approver: String,
}

#[derive(Subcommand, Debug)]
pub enum SubmitCommand {
    /// Vote on a committee approval
    Vote {
        #[command(flatten)]
        target: SubmitTarget,

        #[arg(value_enum)]
        decision: VoteArg,
    },

    /// Submit a payout checklist sheet, replacing any earlier one
    Checklist {
        #[command(flatten)]
        target: SubmitTarget,

        /// Item to mark checked (repeatable)
        #[arg(long = "check", value_name = "ITEM")]
        checked: Vec<u64>,

        /// Item to mark explicitly unchecked (repeatable)
        #[arg(long = "uncheck", value_name = "ITEM")]
        unchecked: Vec<u64>,

        /// Free-form notes
        #[arg(long, default_value = "")]
        notes: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show the active configuration of a gate
    Show {
        #[arg(value_enum)]
        gate: GateArg,

        /// Include every stored configuration
        #[arg(long)]
        history: bool,
    },

    /// Set the required approvers of a gate
    Set {
        #[arg(value_enum)]
        gate: GateArg,

        /// Required approvers (at least 1)
        required: usize,
    },

    /// Re-activate a stored configuration
    Activate {
        /// Config ID
        id: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum ItemCommand {
    /// Add an active checklist item
    Add {
        title: String,

        #[arg(long, default_value = "")]
        description: String,

        /// Display position
        #[arg(long, default_value_t = 0)]
        order: u32,
    },

    /// Deactivate an item
    Deactivate {
        /// Item ID
        item: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum MemberCommand {
    /// Add an approver to a gate's group
    Add {
        #[arg(value_enum)]
        gate: GateArg,

        approver: String,
    },

    /// Remove an approver from a gate's group
    Remove {
        #[arg(value_enum)]
        gate: GateArg,

        approver: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_checklist_submission() {
        let cli = Cli::parse_from([
            "estate-quorum",
            "-vv",
            "submit",
            "checklist",
            "7",
            "--approver",
            "bob",
            "--check",
            "1",
            "--check",
            "2",
            "--uncheck",
            "3",
        ]);
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Some(Command::Submit(SubmitCommand::Checklist {
                target,
                checked,
                unchecked,
                ..
            })) => {
                assert_eq!(target.subject, 7);
                assert_eq!(target.approver, "bob");
                assert_eq!(checked, vec![1, 2]);
                assert_eq!(unchecked, vec![3]);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_vote_with_json_output() {
        let cli = Cli::parse_from([
            "estate-quorum",
            "submit",
            "vote",
            "3",
            "--approver",
            "alice",
            "reject",
            "--output",
            "json",
        ]);
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(
            cli.command,
            Some(Command::Submit(SubmitCommand::Vote {
                decision: VoteArg::Reject,
                ..
            }))
        ));
    }

    #[test]
    fn test_show_config_needs_no_subcommand() {
        let cli = Cli::parse_from(["estate-quorum", "--show-config"]);
        assert!(cli.show_config);
        assert!(cli.command.is_none());
    }
}
