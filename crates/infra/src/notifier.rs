//! Recipient resolution and notification fan-out.

use std::collections::HashSet;
use std::sync::Arc;

use stockroom_auth::{UserRole, UserSettings};
use stockroom_core::UserId;
use stockroom_notifications::{Notification, NotificationType};

use crate::store::{NotificationStore, StoreResult, UserSettingsStore, UserStore};

/// The per-user preference flag gating a notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertFlag {
    LowStockAlerts,
    StockUpdateNotifications,
}

impl AlertFlag {
    pub fn enabled_in(&self, settings: &UserSettings) -> bool {
        match self {
            AlertFlag::LowStockAlerts => settings.low_stock_alerts,
            AlertFlag::StockUpdateNotifications => settings.stock_update_notifications,
        }
    }
}

/// Resolves which users a notification category should reach.
pub struct RecipientResolver {
    users: Arc<dyn UserStore>,
    settings: Arc<dyn UserSettingsStore>,
}

impl RecipientResolver {
    pub fn new(users: Arc<dyn UserStore>, settings: Arc<dyn UserSettingsStore>) -> Self {
        Self { users, settings }
    }

    /// Users with the given role whose settings opt them into `flag`.
    ///
    /// Uses the plain settings lookup: a user with no settings document is
    /// not treated as opted in, even though fresh defaults would say yes.
    pub fn resolve(&self, role: UserRole, flag: AlertFlag) -> StoreResult<HashSet<UserId>> {
        let mut recipients = HashSet::new();
        for user in self.users.list_by_role(role)? {
            if let Some(settings) = self.settings.get(&user.id)? {
                if flag.enabled_in(&settings) {
                    recipients.insert(user.id);
                }
            }
        }
        Ok(recipients)
    }
}

/// Writes one notification document per recipient.
pub struct NotificationDispatcher {
    notifications: Arc<dyn NotificationStore>,
}

impl NotificationDispatcher {
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// Returns how many notifications were written.
    pub fn dispatch(
        &self,
        recipients: &HashSet<UserId>,
        kind: NotificationType,
        title: &str,
        message: &str,
        data: serde_json::Value,
    ) -> StoreResult<usize> {
        for user_id in recipients {
            self.notifications.insert(Notification::new(
                *user_id,
                kind,
                title,
                message,
                data.clone(),
            ))?;
        }
        tracing::debug!(
            kind = %kind,
            recipients = recipients.len(),
            "dispatched notifications"
        );
        Ok(recipients.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{
        InMemoryNotificationStore, InMemoryUserSettingsStore, InMemoryUserStore,
    };
    use stockroom_auth::{NewUser, User};

    fn user(username: &str, role: UserRole) -> User {
        User::create(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "$argon2id$stub".to_string(),
            first_name: None,
            last_name: None,
            phone: None,
            role,
        })
        .unwrap()
    }

    #[test]
    fn resolve_skips_opted_out_and_settingless_users() {
        let users = Arc::new(InMemoryUserStore::new());
        let settings = Arc::new(InMemoryUserSettingsStore::new());

        let opted_in = user("keeper-in", UserRole::Storekeeper);
        let opted_out = user("keeper-out", UserRole::Storekeeper);
        let no_settings = user("keeper-none", UserRole::Storekeeper);
        let wrong_role = user("owner", UserRole::Owner);

        settings
            .upsert(UserSettings::defaults_for(opted_in.id))
            .unwrap();
        let mut off = UserSettings::defaults_for(opted_out.id);
        off.low_stock_alerts = false;
        settings.upsert(off).unwrap();
        settings
            .upsert(UserSettings::defaults_for(wrong_role.id))
            .unwrap();

        let expected = opted_in.id;
        for u in [opted_in, opted_out, no_settings, wrong_role] {
            users.insert(u).unwrap();
        }

        let resolver = RecipientResolver::new(users, settings);
        let recipients = resolver
            .resolve(UserRole::Storekeeper, AlertFlag::LowStockAlerts)
            .unwrap();
        assert_eq!(recipients, HashSet::from([expected]));
    }

    #[test]
    fn dispatch_writes_one_notification_per_recipient() {
        let store = Arc::new(InMemoryNotificationStore::new());
        let dispatcher = NotificationDispatcher::new(store.clone());

        let a = UserId::new();
        let b = UserId::new();
        let written = dispatcher
            .dispatch(
                &HashSet::from([a, b]),
                NotificationType::LowStock,
                "Low Stock Alert",
                "Product \"Widget\" is low in stock (2 remaining)",
                serde_json::json!({ "quantity": 2 }),
            )
            .unwrap();

        assert_eq!(written, 2);
        assert_eq!(store.unread_count(&a).unwrap(), 1);
        assert_eq!(store.unread_count(&b).unwrap(), 1);
    }
}
