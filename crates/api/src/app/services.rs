use std::sync::Arc;

use tokio::sync::broadcast;

use stockroom_auth::{Argon2Hasher, Hs256TokenCodec, PasswordHasher};
use stockroom_core::ProductId;
use stockroom_infra::{
    InventoryHistoryStore, InventoryService, NotificationStore, ProductStore, UserSettingsStore,
    UserStore,
    store::{
        InMemoryHistoryStore, InMemoryNotificationStore, InMemoryProductStore,
        InMemoryUserSettingsStore, InMemoryUserStore,
    },
};

/// Realtime message broadcast to WebSocket clients when stock changes.
#[derive(Debug, Clone, serde::Serialize)]
pub struct StockUpdateMessage {
    pub product_id: ProductId,
    pub product_name: String,
    pub quantity: i64,
}

/// Shared service graph handed to every handler via `Extension`.
pub struct AppServices {
    pub users: Arc<dyn UserStore>,
    pub settings: Arc<dyn UserSettingsStore>,
    pub products: Arc<dyn ProductStore>,
    pub history: Arc<dyn InventoryHistoryStore>,
    pub notifications: Arc<dyn NotificationStore>,
    pub inventory: InventoryService,
    pub hasher: Arc<dyn PasswordHasher>,
    pub tokens: Arc<Hs256TokenCodec>,
    /// Lossy broadcast; slow WebSocket consumers skip messages rather than
    /// applying backpressure to request handlers.
    pub realtime_tx: broadcast::Sender<StockUpdateMessage>,
}

pub fn build_services(tokens: Arc<Hs256TokenCodec>) -> AppServices {
    // In-memory store wiring; the trait seams are where a database driver
    // would plug in.
    let users: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
    let settings: Arc<dyn UserSettingsStore> = Arc::new(InMemoryUserSettingsStore::new());
    let products: Arc<dyn ProductStore> = Arc::new(InMemoryProductStore::new());
    let history: Arc<dyn InventoryHistoryStore> = Arc::new(InMemoryHistoryStore::new());
    let notifications: Arc<dyn NotificationStore> = Arc::new(InMemoryNotificationStore::new());

    let inventory = InventoryService::new(
        products.clone(),
        history.clone(),
        users.clone(),
        settings.clone(),
        notifications.clone(),
    );

    let (realtime_tx, _realtime_rx) = broadcast::channel::<StockUpdateMessage>(256);

    AppServices {
        users,
        settings,
        products,
        history,
        notifications,
        inventory,
        hasher: Arc::new(Argon2Hasher::new()),
        tokens,
        realtime_tx,
    }
}
