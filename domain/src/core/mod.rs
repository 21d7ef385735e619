//! Core domain concepts shared across all subdomains.
//!
//! - [`ids`]: identifier newtypes (subjects, loans, approvers, items, configs)
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod ids;
