//! Stock-change classification.
//!
//! The inventory endpoint sets an absolute quantity; this module decides what
//! that means (added vs removed), how big the change was, and whether it
//! lands at or below a product's low-stock threshold.

use crate::InventoryAction;

/// Outcome of classifying one requested quantity against the current stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockChange {
    pub action: InventoryAction,
    /// Absolute size of the change.
    pub delta: i64,
    pub previous_quantity: i64,
    pub new_quantity: i64,
}

impl StockChange {
    /// Classify a requested absolute quantity.
    ///
    /// `requested > previous` is `stock_added`; anything else, including an
    /// unchanged quantity, is `stock_removed`. The equal case is a
    /// long-standing product quirk and is kept as-is.
    pub fn classify(previous: i64, requested: i64) -> Self {
        let action = if requested > previous {
            InventoryAction::StockAdded
        } else {
            InventoryAction::StockRemoved
        };

        Self {
            action,
            delta: (requested - previous).abs(),
            previous_quantity: previous,
            new_quantity: requested,
        }
    }

    /// Whether this change triggers the stock-update notification category.
    pub fn notifies_stock_update(&self) -> bool {
        matches!(
            self.action,
            InventoryAction::StockAdded | InventoryAction::StockRemoved
        )
    }
}

/// Low-stock trigger: at or below the threshold.
pub fn crosses_low_stock(new_quantity: i64, threshold: i64) -> bool {
    new_quantity <= threshold
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn increase_is_stock_added() {
        let change = StockChange::classify(10, 20);
        assert_eq!(change.action, InventoryAction::StockAdded);
        assert_eq!(change.delta, 10);
        assert_eq!(change.previous_quantity, 10);
        assert_eq!(change.new_quantity, 20);
    }

    #[test]
    fn decrease_is_stock_removed() {
        let change = StockChange::classify(10, 3);
        assert_eq!(change.action, InventoryAction::StockRemoved);
        assert_eq!(change.delta, 7);
    }

    #[test]
    fn unchanged_quantity_classifies_as_stock_removed() {
        // Quirk kept on purpose: a no-op adjustment is labeled a removal.
        let change = StockChange::classify(5, 5);
        assert_eq!(change.action, InventoryAction::StockRemoved);
        assert_eq!(change.delta, 0);
    }

    #[test]
    fn low_stock_boundary_is_inclusive() {
        assert!(crosses_low_stock(5, 5));
        assert!(crosses_low_stock(3, 5));
        assert!(!crosses_low_stock(6, 5));
    }

    proptest! {
        #[test]
        fn delta_is_always_the_absolute_difference(
            previous in 0i64..1_000_000,
            requested in 0i64..1_000_000,
        ) {
            let change = StockChange::classify(previous, requested);
            prop_assert_eq!(change.delta, (requested - previous).abs());
            prop_assert!(change.delta >= 0);
        }

        #[test]
        fn classification_matches_direction(
            previous in 0i64..1_000_000,
            requested in 0i64..1_000_000,
        ) {
            let change = StockChange::classify(previous, requested);
            if requested > previous {
                prop_assert_eq!(change.action, InventoryAction::StockAdded);
            } else {
                prop_assert_eq!(change.action, InventoryAction::StockRemoved);
            }
            prop_assert!(change.notifies_stock_update());
        }
    }
}
