//! Checklist catalog port

use super::store::StoreError;
use async_trait::async_trait;
use estate_quorum_domain::{ChecklistItem, ItemId};

/// Read access to the externally managed checklist master list
#[async_trait]
pub trait ChecklistCatalog: Send + Sync {
    /// Active items ordered by `(order, title)`
    async fn active_items(&self) -> Result<Vec<ChecklistItem>, StoreError>;

    async fn item(&self, id: ItemId) -> Result<Option<ChecklistItem>, StoreError>;
}
