//! Inventory domain module.
//!
//! The stock-change classification engine and the immutable audit record it
//! produces. Pure deterministic logic; orchestration against stores lives in
//! `stockroom-infra`.

pub mod adjustment;
pub mod history;

pub use adjustment::{StockChange, crosses_low_stock};
pub use history::{InventoryAction, InventoryHistoryRecord};
