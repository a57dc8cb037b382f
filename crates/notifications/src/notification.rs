use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{NotificationId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    OrderPlaced,
    OrderUpdated,
    PaymentReceived,
    LowStock,
    StockUpdate,
    ProductReview,
    System,
}

impl NotificationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            NotificationType::OrderPlaced => "order_placed",
            NotificationType::OrderUpdated => "order_updated",
            NotificationType::PaymentReceived => "payment_received",
            NotificationType::LowStock => "low_stock",
            NotificationType::StockUpdate => "stock_update",
            NotificationType::ProductReview => "product_review",
            NotificationType::System => "system",
        }
    }
}

impl core::fmt::Display for NotificationType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One notification addressed to one user.
///
/// `data` carries category-specific structured payload (product id, the
/// quantities involved, etc). Unread on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    pub kind: NotificationType,
    pub title: String,
    pub message: String,
    pub read: bool,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Notification {
    pub fn new(
        user_id: UserId,
        kind: NotificationType,
        title: impl Into<String>,
        message: impl Into<String>,
        data: serde_json::Value,
    ) -> Self {
        Self {
            id: NotificationId::new(),
            user_id,
            kind,
            title: title.into(),
            message: message.into(),
            read: false,
            data,
            created_at: Utc::now(),
            expires_at: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_notifications_are_unread() {
        let n = Notification::new(
            UserId::new(),
            NotificationType::LowStock,
            "Low Stock Alert",
            "Product \"Widget\" is low in stock (3 remaining)",
            serde_json::json!({ "quantity": 3 }),
        );
        assert!(!n.read);
        assert!(n.expires_at.is_none());
        assert_eq!(n.kind.as_str(), "low_stock");
    }
}
