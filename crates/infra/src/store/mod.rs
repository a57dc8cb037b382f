//! Storage abstractions.
//!
//! Persistence is an external collaborator: these traits are the seam where
//! a real database driver would plug in. The in-memory implementations in
//! [`memory`] back tests, dev, and the default server wiring.

pub mod memory;

use thiserror::Error;

use stockroom_auth::{User, UserRole, UserSettings};
use stockroom_catalog::Product;
use stockroom_core::{NotificationId, ProductId, UserId};
use stockroom_inventory::InventoryHistoryRecord;
use stockroom_notifications::Notification;

pub use memory::{
    InMemoryHistoryStore, InMemoryNotificationStore, InMemoryProductStore,
    InMemoryUserSettingsStore, InMemoryUserStore,
};

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The store rejected or could not perform an operation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// One page of query results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    /// 1-based page number this slice came from.
    pub page: u64,
    /// Total number of pages at the requested limit.
    pub pages: u64,
}

impl<T> Page<T> {
    pub fn slice(mut items: Vec<T>, page: u64, limit: u64) -> Self {
        let limit = limit.max(1);
        let page = page.max(1);
        let total = items.len() as u64;
        let pages = total.div_ceil(limit);

        let start = ((page - 1) * limit).min(total) as usize;
        let end = (start + limit as usize).min(items.len());
        let items = items.drain(start..end).collect();

        Self {
            items,
            total,
            page,
            pages,
        }
    }
}

/// Product listing filters (all optional, combined with AND).
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub category: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    /// Case-insensitive substring over name/description/category/tags.
    pub search: Option<String>,
    pub featured: Option<bool>,
    /// Field name, `-` prefix for descending. Default: newest first.
    pub sort: Option<String>,
    pub page: u64,
    pub limit: u64,
}

impl ProductQuery {
    pub const DEFAULT_LIMIT: u64 = 20;
}

pub trait UserStore: Send + Sync {
    fn insert(&self, user: User) -> StoreResult<()>;
    fn get(&self, id: &UserId) -> StoreResult<Option<User>>;
    fn find_by_username(&self, username: &str) -> StoreResult<Option<User>>;
    fn find_by_username_or_email(&self, username: &str, email: &str)
    -> StoreResult<Option<User>>;
    fn update(&self, user: User) -> StoreResult<()>;
    fn list_by_role(&self, role: UserRole) -> StoreResult<Vec<User>>;
}

pub trait UserSettingsStore: Send + Sync {
    /// Plain lookup: users without a settings document stay invisible here.
    fn get(&self, user_id: &UserId) -> StoreResult<Option<UserSettings>>;

    /// Explicit upsert-with-defaults at the persistence boundary: returns the
    /// existing document or creates (and persists) the defaults.
    fn get_or_default(&self, user_id: UserId) -> StoreResult<UserSettings>;

    fn upsert(&self, settings: UserSettings) -> StoreResult<()>;
}

pub trait ProductStore: Send + Sync {
    fn insert(&self, product: Product) -> StoreResult<()>;
    fn get(&self, id: &ProductId) -> StoreResult<Option<Product>>;
    fn update(&self, product: Product) -> StoreResult<()>;
    /// Returns whether the product existed.
    fn delete(&self, id: &ProductId) -> StoreResult<bool>;

    /// Atomically swap a product's quantity, returning the previous value and
    /// the updated product. Concurrent adjustments serialize here, so no
    /// read-modify-write can be lost.
    fn set_quantity(&self, id: &ProductId, quantity: i64)
    -> StoreResult<Option<(i64, Product)>>;

    fn query(&self, query: &ProductQuery) -> StoreResult<Page<Product>>;
}

/// Append-only: there is deliberately no update or delete.
pub trait InventoryHistoryStore: Send + Sync {
    fn append(&self, record: InventoryHistoryRecord) -> StoreResult<()>;
    /// All records for a product, newest first.
    fn for_product(&self, product_id: &ProductId) -> StoreResult<Vec<InventoryHistoryRecord>>;
}

pub trait NotificationStore: Send + Sync {
    fn insert(&self, notification: Notification) -> StoreResult<()>;
    fn get(&self, id: &NotificationId) -> StoreResult<Option<Notification>>;
    fn update(&self, notification: Notification) -> StoreResult<()>;
    /// Returns whether the notification existed.
    fn delete(&self, id: &NotificationId) -> StoreResult<bool>;

    /// A user's notifications, newest first, optionally filtered by read
    /// state.
    fn for_user(
        &self,
        user_id: &UserId,
        read: Option<bool>,
        page: u64,
        limit: u64,
    ) -> StoreResult<Page<Notification>>;

    fn unread_count(&self, user_id: &UserId) -> StoreResult<u64>;

    /// Returns how many notifications were flipped to read.
    fn mark_all_read(&self, user_id: &UserId) -> StoreResult<u64>;
}
