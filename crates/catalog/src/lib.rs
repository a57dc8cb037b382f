//! Catalog domain module.
//!
//! Deterministic domain logic for products (no IO, no HTTP, no storage).

pub mod product;

pub use product::{DEFAULT_LOW_STOCK_THRESHOLD, NewProduct, Product, ProductPatch};
