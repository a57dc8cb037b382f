use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use stockroom_core::{DomainError, DomainResult, ProductId};

/// Low-stock threshold applied when a product doesn't set its own.
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 5;

/// A catalog product.
///
/// `price` is in the smallest currency unit (e.g. kobo/cents).
/// Invariant: `quantity` is never negative.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: String,
    pub tags: Vec<String>,
    pub quantity: i64,
    pub low_stock_threshold: i64,
    pub featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: u64,
    pub category: String,
    pub tags: Vec<String>,
    pub quantity: i64,
    pub low_stock_threshold: Option<i64>,
    pub featured: bool,
}

/// Partial update for the generic product-edit path.
///
/// `quantity` is deliberately carried separately by callers: a changed
/// quantity routes through the inventory audit flow, not a blind overwrite.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<u64>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub quantity: Option<i64>,
    pub low_stock_threshold: Option<i64>,
    pub featured: Option<bool>,
}

impl Product {
    pub fn create(input: NewProduct) -> DomainResult<Self> {
        if input.name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        if input.category.trim().is_empty() {
            return Err(DomainError::validation("category cannot be empty"));
        }
        if input.quantity < 0 {
            return Err(DomainError::validation("quantity cannot be negative"));
        }
        if let Some(t) = input.low_stock_threshold {
            if t < 0 {
                return Err(DomainError::validation(
                    "low_stock_threshold cannot be negative",
                ));
            }
        }

        let now = Utc::now();
        Ok(Self {
            id: ProductId::new(),
            name: input.name.trim().to_string(),
            description: input.description,
            price: input.price,
            category: input.category.trim().to_string(),
            tags: input.tags,
            quantity: input.quantity,
            low_stock_threshold: input
                .low_stock_threshold
                .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD),
            featured: input.featured,
            created_at: now,
            updated_at: now,
        })
    }

    /// Apply the non-quantity fields of a patch.
    ///
    /// Quantity changes are the inventory flow's business; callers take
    /// `patch.quantity` out before (or after) calling this.
    pub fn apply_patch(&mut self, patch: &ProductPatch) -> DomainResult<()> {
        if let Some(name) = &patch.name {
            if name.trim().is_empty() {
                return Err(DomainError::validation("name cannot be empty"));
            }
            self.name = name.trim().to_string();
        }
        if let Some(description) = &patch.description {
            self.description = description.clone();
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(category) = &patch.category {
            if category.trim().is_empty() {
                return Err(DomainError::validation("category cannot be empty"));
            }
            self.category = category.trim().to_string();
        }
        if let Some(tags) = &patch.tags {
            self.tags = tags.clone();
        }
        if let Some(threshold) = patch.low_stock_threshold {
            if threshold < 0 {
                return Err(DomainError::validation(
                    "low_stock_threshold cannot be negative",
                ));
            }
            self.low_stock_threshold = threshold;
        }
        if let Some(featured) = patch.featured {
            self.featured = featured;
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    /// At or below the configured threshold.
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }
}
