//! The inventory adjustment flow.
//!
//! Every path that changes a product's quantity goes through here so the
//! audit trail and the notification fan-out cannot be skipped: the direct
//! inventory endpoint, the generic product edit, and product creation.

use std::sync::Arc;

use thiserror::Error;

use stockroom_auth::UserRole;
use stockroom_catalog::{Product, ProductPatch};
use stockroom_core::{DomainError, ProductId, UserId};
use stockroom_inventory::{
    InventoryAction, InventoryHistoryRecord, StockChange, crosses_low_stock,
};
use stockroom_notifications::NotificationType;

use crate::notifier::{AlertFlag, NotificationDispatcher, RecipientResolver};
use crate::store::{
    InventoryHistoryStore, NotificationStore, ProductStore, StoreError, UserSettingsStore,
    UserStore,
};

#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("product not found")]
    NotFound,
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<DomainError> for InventoryError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound => InventoryError::NotFound,
            other => InventoryError::Validation(other.to_string()),
        }
    }
}

/// Orchestrates quantity changes: swap the stored quantity, append the audit
/// record, then fan notifications out to opted-in storekeepers.
pub struct InventoryService {
    products: Arc<dyn ProductStore>,
    history: Arc<dyn InventoryHistoryStore>,
    resolver: RecipientResolver,
    dispatcher: NotificationDispatcher,
}

impl InventoryService {
    pub fn new(
        products: Arc<dyn ProductStore>,
        history: Arc<dyn InventoryHistoryStore>,
        users: Arc<dyn UserStore>,
        settings: Arc<dyn UserSettingsStore>,
        notifications: Arc<dyn NotificationStore>,
    ) -> Self {
        Self {
            products,
            history,
            resolver: RecipientResolver::new(users, settings),
            dispatcher: NotificationDispatcher::new(notifications),
        }
    }

    /// Set a product's absolute quantity (the dedicated inventory endpoint).
    ///
    /// Classifies the change as added/removed, appends the audit record, then
    /// runs two independent fan-outs: stock-update to storekeepers who opted
    /// into stock update notifications, and a low-stock alert if the new
    /// quantity sits at or below the product's threshold.
    pub fn adjust_stock(
        &self,
        product_id: &ProductId,
        requested_quantity: i64,
        actor: UserId,
        notes: Option<String>,
    ) -> Result<(Product, InventoryHistoryRecord), InventoryError> {
        if requested_quantity < 0 {
            return Err(InventoryError::Validation(
                "quantity cannot be negative".to_string(),
            ));
        }

        let (previous, product) = self
            .products
            .set_quantity(product_id, requested_quantity)?
            .ok_or(InventoryError::NotFound)?;

        let change = StockChange::classify(previous, requested_quantity);
        let record = InventoryHistoryRecord::new(
            *product_id,
            change.action,
            change.previous_quantity,
            change.new_quantity,
            actor,
            notes,
        );
        self.history.append(record.clone())?;

        tracing::info!(
            product_id = %product.id,
            action = %change.action,
            previous = change.previous_quantity,
            new = change.new_quantity,
            "stock adjusted"
        );

        if change.notifies_stock_update() {
            self.notify_stock_update(&product, &change)?;
        }
        if crosses_low_stock(change.new_quantity, product.low_stock_threshold) {
            self.notify_low_stock(&product)?;
        }

        Ok((product, record))
    }

    /// Apply a product edit. A changed quantity in the patch is routed
    /// through the audit trail as a `stock_adjusted` record and triggers the
    /// low-stock check only; the stock-update category stays quiet on this
    /// path.
    pub fn apply_product_edit(
        &self,
        product_id: &ProductId,
        patch: &ProductPatch,
        actor: UserId,
    ) -> Result<(Product, Option<InventoryHistoryRecord>), InventoryError> {
        let mut product = self
            .products
            .get(product_id)?
            .ok_or(InventoryError::NotFound)?;
        product.apply_patch(patch)?;

        let record = match patch.quantity {
            Some(requested) if requested != product.quantity => {
                if requested < 0 {
                    return Err(InventoryError::Validation(
                        "quantity cannot be negative".to_string(),
                    ));
                }
                let previous = product.quantity;
                product.quantity = requested;

                let record = InventoryHistoryRecord::new(
                    *product_id,
                    InventoryAction::StockAdjusted,
                    previous,
                    requested,
                    actor,
                    None,
                );
                self.history.append(record.clone())?;
                Some(record)
            }
            _ => None,
        };

        self.products.update(product.clone())?;

        if record.is_some() && product.is_low_stock() {
            self.notify_low_stock(&product)?;
        }

        Ok((product, record))
    }

    /// Record the initial stock of a freshly created product.
    pub fn record_product_created(
        &self,
        product: &Product,
        actor: UserId,
    ) -> Result<InventoryHistoryRecord, InventoryError> {
        let record = InventoryHistoryRecord::new(
            product.id,
            InventoryAction::ProductCreated,
            0,
            product.quantity,
            actor,
            None,
        );
        self.history.append(record.clone())?;
        Ok(record)
    }

    fn notify_stock_update(
        &self,
        product: &Product,
        change: &StockChange,
    ) -> Result<(), InventoryError> {
        let recipients = self.resolver.resolve(
            UserRole::Storekeeper,
            AlertFlag::StockUpdateNotifications,
        )?;
        self.dispatcher.dispatch(
            &recipients,
            NotificationType::StockUpdate,
            "Stock Update",
            &format!(
                "Product \"{}\" stock updated from {} to {}",
                product.name, change.previous_quantity, change.new_quantity
            ),
            serde_json::json!({
                "product_id": product.id,
                "previous_quantity": change.previous_quantity,
                "new_quantity": change.new_quantity,
            }),
        )?;
        Ok(())
    }

    fn notify_low_stock(&self, product: &Product) -> Result<(), InventoryError> {
        let recipients = self
            .resolver
            .resolve(UserRole::Storekeeper, AlertFlag::LowStockAlerts)?;
        self.dispatcher.dispatch(
            &recipients,
            NotificationType::LowStock,
            "Low Stock Alert",
            &format!(
                "Product \"{}\" is low in stock ({} remaining)",
                product.name, product.quantity
            ),
            serde_json::json!({
                "product_id": product.id,
                "quantity": product.quantity,
                "threshold": product.low_stock_threshold,
            }),
        )?;
        Ok(())
    }
}
