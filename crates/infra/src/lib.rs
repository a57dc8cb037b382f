//! `stockroom-infra` — storage seams and the multi-step flows.
//!
//! Domain crates stay pure; everything that touches a store lives here:
//! the store traits with their in-memory implementations, the recipient
//! resolver + notification dispatcher, and the inventory adjustment service
//! that ties them together.

pub mod inventory_service;
pub mod notifier;
pub mod store;

pub use inventory_service::{InventoryError, InventoryService};
pub use notifier::{AlertFlag, NotificationDispatcher, RecipientResolver};
pub use store::{
    InventoryHistoryStore, NotificationStore, Page, ProductQuery, ProductStore, StoreError,
    StoreResult, UserSettingsStore, UserStore,
};
