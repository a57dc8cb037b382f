use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{HistoryRecordId, ProductId, UserId};

/// What a history record documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InventoryAction {
    StockAdded,
    StockRemoved,
    StockAdjusted,
    LowStockAlert,
    ProductCreated,
    ProductUpdated,
}

impl InventoryAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            InventoryAction::StockAdded => "stock_added",
            InventoryAction::StockRemoved => "stock_removed",
            InventoryAction::StockAdjusted => "stock_adjusted",
            InventoryAction::LowStockAlert => "low_stock_alert",
            InventoryAction::ProductCreated => "product_created",
            InventoryAction::ProductUpdated => "product_updated",
        }
    }
}

impl core::fmt::Display for InventoryAction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable, append-only audit record of one quantity change.
///
/// `quantity` is the absolute size of the change; the signed direction is
/// recoverable from `previous_quantity`/`new_quantity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryHistoryRecord {
    pub id: HistoryRecordId,
    pub product_id: ProductId,
    pub action: InventoryAction,
    pub quantity: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
    pub performed_by: UserId,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl InventoryHistoryRecord {
    pub fn new(
        product_id: ProductId,
        action: InventoryAction,
        previous_quantity: i64,
        new_quantity: i64,
        performed_by: UserId,
        notes: Option<String>,
    ) -> Self {
        Self {
            id: HistoryRecordId::new(),
            product_id,
            action,
            quantity: (new_quantity - previous_quantity).abs(),
            previous_quantity,
            new_quantity,
            performed_by,
            notes,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_is_absolute_delta() {
        let product = ProductId::new();
        let actor = UserId::new();

        let up =
            InventoryHistoryRecord::new(product, InventoryAction::StockAdded, 3, 10, actor, None);
        assert_eq!(up.quantity, 7);

        let down =
            InventoryHistoryRecord::new(product, InventoryAction::StockRemoved, 10, 3, actor, None);
        assert_eq!(down.quantity, 7);
    }

    #[test]
    fn action_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&InventoryAction::StockAdjusted).unwrap(),
            "\"stock_adjusted\""
        );
    }
}
