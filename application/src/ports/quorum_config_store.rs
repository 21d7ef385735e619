//! Quorum configuration port

use super::store::StoreError;
use async_trait::async_trait;
use estate_quorum_domain::{ConfigId, GateKind, QuorumConfig, RequiredApprovers};

/// Holds the threshold configurations, exactly one active per gate kind
#[async_trait]
pub trait QuorumConfigStore: Send + Sync {
    /// The active configuration, or `None` when no record is active
    async fn active(&self, gate_kind: GateKind) -> Result<Option<QuorumConfig>, StoreError>;

    /// Insert a new record and make it the only active one, in one write
    async fn set_active(
        &self,
        gate_kind: GateKind,
        required_approvers: RequiredApprovers,
    ) -> Result<QuorumConfig, StoreError>;

    /// Re-activate an existing record, deactivating its siblings in one write
    async fn activate(&self, id: ConfigId) -> Result<QuorumConfig, StoreError>;

    async fn history(&self, gate_kind: GateKind) -> Result<Vec<QuorumConfig>, StoreError>;
}
