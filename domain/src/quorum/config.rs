//! Quorum configuration records

use super::threshold::RequiredApprovers;
use crate::core::ids::ConfigId;
use crate::gate::GateKind;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored threshold configuration for one gate kind
///
/// At most one record per gate kind is active at a time; activation of one
/// record deactivates its siblings in the same write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuorumConfig {
    pub id: ConfigId,
    pub gate_kind: GateKind,
    pub required_approvers: RequiredApprovers,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl QuorumConfig {
    pub fn new(
        id: ConfigId,
        gate_kind: GateKind,
        required_approvers: RequiredApprovers,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            gate_kind,
            required_approvers,
            active: true,
            created_at,
        }
    }
}

impl std::fmt::Display for QuorumConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} requires {}{}",
            self.gate_kind,
            self.required_approvers,
            if self.active { "" } else { " (inactive)" }
        )
    }
}
