//! CLI entrypoint for estate-quorum
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use estate_quorum_application::{
    ConfigureGateUseCase, EvaluateSubjectUseCase, GateContext, GateSettings, OpenSubjectUseCase,
    PendingSubjectsUseCase, SubjectStatusUseCase, SubmitInput, SubmitUseCase, TransitionNotifier,
};
use estate_quorum_domain::{
    ApproverId, ChecklistPayload, ConfigId, Decision, GateKind, ItemId, LoanId, SubjectId,
};
use estate_quorum_infrastructure::{
    ConfigLoader, FileConfig, InMemoryGateStore, JsonlTransitionNotifier, Severity, SnapshotFile,
    StateSession, TracingTransitionNotifier,
};
use estate_quorum_presentation::{
    Cli, Command, ConfigCommand, ItemCommand, LoanCommand, MemberCommand, OutputFormatter,
    SubjectCommand, SubmitCommand, formatter_for,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).map_err(|e| anyhow!("{}", e))?
    };

    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;

    for issue in config.validate() {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => bail!("Invalid configuration: {}", issue.message),
        }
    }
    let settings = config.to_settings()?;

    let Some(command) = cli.command else {
        bail!("No command given. Run with --help for usage.");
    };

    // === Dependency Injection ===
    // The session holds the snapshot lock until it is committed or dropped
    let session = StateSession::open(
        SnapshotFile::new(&config.storage.state_file),
        build_notifier(&config),
    )?;
    let store = session.store();
    let ctx = session.context().with_settings(settings);

    info!("Loaded state from {}", session.snapshot().path().display());

    let formatter = formatter_for(cli.output);
    let mutates = !matches!(
        command,
        Command::Status { .. }
            | Command::Subject(SubjectCommand::Pending { .. })
            | Command::Config(ConfigCommand::Show { .. })
    );

    let output = run(command, &ctx, &store, formatter.as_ref()).await?;

    if mutates {
        let delivered = session.commit().await?;
        debug!(delivered, "State committed");
    }

    println!("{}", output.trim_end());
    Ok(())
}

/// Initialize logging based on verbosity level
fn init_logging(verbose: u8, file: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let filter = match verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    match file {
        Some(path) => {
            let name = path
                .file_name()
                .with_context(|| format!("logging.file has no file name: {}", path.display()))?;
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_writer(writer)
                .init();
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_writer(std::io::stderr)
                .init();
            Ok(None)
        }
    }
}

fn build_notifier(config: &FileConfig) -> Arc<dyn TransitionNotifier> {
    match &config.notifications.outbox {
        Some(path) => match JsonlTransitionNotifier::new(path) {
            Some(notifier) => Arc::new(notifier),
            None => {
                warn!("Falling back to log notifications");
                Arc::new(TracingTransitionNotifier)
            }
        },
        None => Arc::new(TracingTransitionNotifier),
    }
}

async fn run(
    command: Command,
    ctx: &GateContext,
    store: &InMemoryGateStore,
    formatter: &dyn OutputFormatter,
) -> Result<String> {
    let output = match command {
        Command::Loan(LoanCommand::Register { loan, amount }) => {
            let loan = store.register_loan(LoanId(loan), amount)?;
            let subject = OpenSubjectUseCase::new(ctx.clone())
                .open_for_loan(loan.id, loan.amount_agreed)
                .await?;
            formatter.record(
                "Loan registered",
                &serde_json::json!({
                    "loan": loan,
                    "subject": subject.id,
                    "gate": subject.gate_kind,
                }),
            )
        }
        Command::Loan(LoanCommand::PaidOut { loan }) => {
            let loan = store.mark_paid_out(LoanId(loan))?;
            formatter.record("Loan paid out", &serde_json::to_value(&loan)?)
        }

        Command::Subject(SubjectCommand::Open { loan, gate }) => {
            let subject = OpenSubjectUseCase::new(ctx.clone())
                .execute(LoanId(loan), gate.into())
                .await?;
            formatter.subject(&subject)
        }
        Command::Subject(SubjectCommand::Pending { gate, approver }) => {
            let viewer = approver.map(ApproverId::from);
            let pending = PendingSubjectsUseCase::new(ctx.clone())
                .execute(gate.map(GateKind::from), viewer.as_ref())
                .await?;
            formatter.pending(&pending)
        }

        Command::Submit(SubmitCommand::Vote { target, decision }) => {
            let input = SubmitInput::new(
                SubjectId(target.subject),
                target.approver,
                Decision::from(decision),
            );
            formatter.submit(&SubmitUseCase::new(ctx.clone()).execute(input).await?)
        }
        Command::Submit(SubmitCommand::Checklist {
            target,
            checked,
            unchecked,
            notes,
        }) => {
            let sheet = checked
                .into_iter()
                .fold(ChecklistPayload::new(), |sheet, id| sheet.check(ItemId(id)));
            let sheet = unchecked
                .into_iter()
                .fold(sheet, |sheet, id| sheet.uncheck(ItemId(id)))
                .with_notes(notes);
            let input = SubmitInput::new(SubjectId(target.subject), target.approver, sheet);
            formatter.submit(&SubmitUseCase::new(ctx.clone()).execute(input).await?)
        }

        Command::Status { subject, approver } => {
            let report = SubjectStatusUseCase::new(ctx.clone())
                .execute(SubjectId(subject), approver.map(ApproverId::from))
                .await?;
            formatter.status(&report)
        }
        Command::Evaluate { subject } => {
            let output = EvaluateSubjectUseCase::new(ctx.clone())
                .execute(SubjectId(subject))
                .await?;
            formatter.evaluation(&output)
        }

        Command::Config(ConfigCommand::Show { gate, history }) => {
            let configure = ConfigureGateUseCase::new(ctx.clone());
            let view = configure.current(gate.into()).await?;
            let history = if history {
                configure.history(gate.into()).await?
            } else {
                Vec::new()
            };
            formatter.gate_config(&view, &history)
        }
        Command::Config(ConfigCommand::Set { gate, required }) => {
            let config = ConfigureGateUseCase::new(ctx.clone())
                .set(gate.into(), required)
                .await?;
            formatter.record("Quorum config activated", &serde_json::to_value(&config)?)
        }
        Command::Config(ConfigCommand::Activate { id }) => {
            let config = ConfigureGateUseCase::new(ctx.clone())
                .activate(ConfigId(id))
                .await?;
            formatter.record("Quorum config activated", &serde_json::to_value(&config)?)
        }

        Command::Item(ItemCommand::Add {
            title,
            description,
            order,
        }) => {
            let item = store.add_item(title, description, order)?;
            formatter.record("Checklist item added", &serde_json::to_value(&item)?)
        }
        Command::Item(ItemCommand::Deactivate { item }) => {
            let item = store.deactivate_item(ItemId(item))?;
            formatter.record("Checklist item deactivated", &serde_json::to_value(&item)?)
        }

        Command::Member(MemberCommand::Add { gate, approver }) => {
            let group = pool_group(ctx.settings(), gate.into());
            let added = store.add_member(&group, ApproverId::from(approver.as_str()))?;
            formatter.record(
                if added { "Member added" } else { "Already a member" },
                &serde_json::json!({ "group": group, "approver": approver }),
            )
        }
        Command::Member(MemberCommand::Remove { gate, approver }) => {
            let group = pool_group(ctx.settings(), gate.into());
            let removed = store.remove_member(&group, &ApproverId::from(approver.as_str()))?;
            formatter.record(
                if removed { "Member removed" } else { "Not a member" },
                &serde_json::json!({ "group": group, "approver": approver }),
            )
        }
    };
    Ok(output)
}

fn pool_group(settings: &GateSettings, gate: GateKind) -> estate_quorum_domain::GroupRef {
    settings.pool_group(gate).clone()
}
