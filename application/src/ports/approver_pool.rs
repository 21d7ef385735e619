//! Approver pool port

use super::store::StoreError;
use async_trait::async_trait;
use estate_quorum_domain::{ApproverId, GroupRef};
use std::collections::BTreeSet;

/// Resolves the current members of an approver group
///
/// Read fresh on every evaluation; implementations must not cache across calls.
#[async_trait]
pub trait ApproverPoolResolver: Send + Sync {
    async fn members_of(&self, group: &GroupRef) -> Result<BTreeSet<ApproverId>, StoreError>;
}
