//! Configure use case
//!
//! Reads and replaces the active quorum configuration of a gate. Changing the
//! threshold does not re-evaluate existing subjects; each one picks up the new
//! value on its next submission or explicit evaluation.

use super::shared::GateContext;
use crate::error::GateError;
use estate_quorum_domain::{
    ChecklistItem, ConfigId, GateKind, GroupRef, QuorumConfig, RequiredApprovers,
};
use serde::Serialize;
use tracing::info;

/// Active configuration of one gate
#[derive(Debug, Clone, Serialize)]
pub struct GateConfigView {
    pub gate_kind: GateKind,
    pub config: QuorumConfig,
    pub pool_group: GroupRef,
    /// Active checklist items (empty for the committee gate)
    pub active_items: Vec<ChecklistItem>,
}

impl GateConfigView {
    pub fn required_approvers(&self) -> RequiredApprovers {
        self.config.required_approvers
    }
}

pub struct ConfigureGateUseCase {
    ctx: GateContext,
}

impl ConfigureGateUseCase {
    pub fn new(ctx: GateContext) -> Self {
        Self { ctx }
    }

    /// The active configuration, or `NoActiveConfig` when the gate is unavailable
    pub async fn current(&self, gate_kind: GateKind) -> Result<GateConfigView, GateError> {
        let config = self
            .ctx
            .configs
            .active(gate_kind)
            .await?
            .ok_or(GateError::NoActiveConfig(gate_kind))?;

        let active_items = match gate_kind {
            GateKind::PayoutChecklist => self.ctx.checklist.active_items().await?,
            GateKind::CommitteeApproval => Vec::new(),
        };

        Ok(GateConfigView {
            gate_kind,
            config,
            pool_group: self.ctx.settings.pool_group(gate_kind).clone(),
            active_items,
        })
    }

    /// Store a new threshold and make it the only active configuration
    pub async fn set(
        &self,
        gate_kind: GateKind,
        required_approvers: usize,
    ) -> Result<QuorumConfig, GateError> {
        let required = RequiredApprovers::new(required_approvers)?;
        let config = self.ctx.configs.set_active(gate_kind, required).await?;
        info!(gate = %gate_kind, config = %config.id, "Activated quorum config: {}", config);
        Ok(config)
    }

    /// Re-activate a previously stored configuration
    pub async fn activate(&self, id: ConfigId) -> Result<QuorumConfig, GateError> {
        let config = self.ctx.configs.activate(id).await?;
        info!(gate = %config.gate_kind, config = %config.id, "Re-activated quorum config");
        Ok(config)
    }

    pub async fn history(&self, gate_kind: GateKind) -> Result<Vec<QuorumConfig>, GateError> {
        Ok(self.ctx.configs.history(gate_kind).await?)
    }
}
