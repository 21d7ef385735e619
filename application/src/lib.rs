//! Application layer for estate-quorum
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod error;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::GateSettings;
pub use error::GateError;
pub use ports::{
    approver_pool::ApproverPoolResolver,
    checklist_catalog::ChecklistCatalog,
    owning_entity::OwningEntityGate,
    quorum_config_store::QuorumConfigStore,
    store::StoreError,
    subject_repository::SubjectRepository,
    submission_ledger::SubmissionLedger,
    transition_notifier::{NoTransitionNotifier, NotifyError, TransitionEvent, TransitionNotifier},
};
pub use use_cases::configure::{ConfigureGateUseCase, GateConfigView};
pub use use_cases::evaluate::{Effects, EvaluateOutput, EvaluateSubjectUseCase};
pub use use_cases::open_subject::OpenSubjectUseCase;
pub use use_cases::pending::{PendingSubject, PendingSubjectsUseCase};
pub use use_cases::shared::{GateContext, SubjectLocks};
pub use use_cases::status::{SubjectStatusReport, SubjectStatusUseCase, ViewerState};
pub use use_cases::submit::{SubmitInput, SubmitOutput, SubmitUseCase};
