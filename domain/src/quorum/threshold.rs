//! Approval threshold
//!
//! The minimum count of distinct approving inputs required to satisfy a poll
//! or a checklist item.

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

/// Required number of distinct approvers (always at least 1)
///
/// # Example
///
/// ```
/// use estate_quorum_domain::quorum::RequiredApprovers;
///
/// let threshold = RequiredApprovers::new(2).unwrap();
/// assert!(!threshold.is_satisfied(1));
/// assert!(threshold.is_satisfied(2));
/// assert!(RequiredApprovers::new(0).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct RequiredApprovers(NonZeroUsize);

impl RequiredApprovers {
    pub const ONE: RequiredApprovers = RequiredApprovers(NonZeroUsize::MIN);

    pub fn new(count: usize) -> Result<Self, DomainError> {
        NonZeroUsize::new(count)
            .map(Self)
            .ok_or(DomainError::InvalidThreshold(count))
    }

    pub fn get(&self) -> usize {
        self.0.get()
    }

    /// Check whether `approvals` distinct approvers reach the threshold
    pub fn is_satisfied(&self, approvals: usize) -> bool {
        approvals >= self.get()
    }

    /// How many more approvals are needed (0 when satisfied)
    pub fn shortfall(&self, approvals: usize) -> usize {
        self.get().saturating_sub(approvals)
    }

    pub fn description(&self) -> String {
        match self.get() {
            1 => "at least 1 approver".to_string(),
            n => format!("at least {} approvers", n),
        }
    }
}

impl TryFrom<usize> for RequiredApprovers {
    type Error = DomainError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RequiredApprovers> for usize {
    fn from(value: RequiredApprovers) -> Self {
        value.get()
    }
}

impl std::fmt::Display for RequiredApprovers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::str::FromStr for RequiredApprovers {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let count: usize = s
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidThreshold(0))?;
        Self::new(count)
    }
}
