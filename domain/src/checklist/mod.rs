//! Checklist items for the payout gate
//!
//! The master list is managed outside the engine; only active items count
//! toward completeness.

use crate::core::ids::ItemId;
use serde::{Deserialize, Serialize};

/// A single risk factor that must be independently confirmed before payout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: ItemId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: u32,
    pub is_active: bool,
}

impl ChecklistItem {
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            order: 0,
            is_active: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }
}

/// Sort items the way they are presented to staff: by `order`, then title
pub fn sort_for_display(items: &mut [ChecklistItem]) {
    items.sort_by(|a, b| a.order.cmp(&b.order).then_with(|| a.title.cmp(&b.title)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_for_display() {
        let mut items = vec![
            ChecklistItem::new(ItemId(1), "Probate grant").with_order(2),
            ChecklistItem::new(ItemId(2), "Identity").with_order(1),
            ChecklistItem::new(ItemId(3), "Bank details").with_order(1),
        ];
        sort_for_display(&mut items);
        let ids: Vec<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![ItemId(3), ItemId(2), ItemId(1)]);
    }
}
