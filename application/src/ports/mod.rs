//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement:
//! persistence of subjects, submissions, configs and checklist items, plus
//! the external collaborators (approver directory, owning loan, notifier).

pub mod approver_pool;
pub mod checklist_catalog;
pub mod owning_entity;
pub mod quorum_config_store;
pub mod store;
pub mod subject_repository;
pub mod submission_ledger;
pub mod transition_notifier;
