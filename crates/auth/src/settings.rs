use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::UserId;

/// Per-user preference document (1–1 with [`crate::User`]).
///
/// The two stock flags drive inventory notification fan-out for
/// storekeepers; the rest are plain display preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub user_id: UserId,

    /// Opt-in for low-stock alerts (storekeeper role).
    pub low_stock_alerts: bool,

    /// Opt-in for stock-update notifications (storekeeper role).
    pub stock_update_notifications: bool,

    pub dark_mode: bool,
    pub language: String,
    pub currency: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserSettings {
    /// Settings document with product defaults: both stock flags opt users
    /// *in* so a freshly-registered storekeeper receives alerts.
    pub fn defaults_for(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            user_id,
            low_stock_alerts: true,
            stock_update_notifications: true,
            dark_mode: false,
            language: "en".to_string(),
            currency: "NGN".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
