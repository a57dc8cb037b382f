//! Request DTOs and JSON mapping helpers.

use serde::Deserialize;
use serde_json::json;

use stockroom_auth::{User, UserSettings};
use stockroom_catalog::Product;
use stockroom_inventory::InventoryHistoryRecord;
use stockroom_notifications::Notification;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSettingsRequest {
    pub low_stock_alerts: Option<bool>,
    pub stock_update_notifications: Option<bool>,
    pub dark_mode: Option<bool>,
    pub language: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: u64,
    pub category: String,
    pub tags: Option<Vec<String>>,
    pub quantity: Option<i64>,
    pub low_stock_threshold: Option<i64>,
    pub featured: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct ProductListQuery {
    pub category: Option<String>,
    pub min_price: Option<u64>,
    pub max_price: Option<u64>,
    pub search: Option<String>,
    pub featured: Option<bool>,
    pub sort: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateInventoryRequest {
    pub quantity: i64,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct NotificationListQuery {
    pub read: Option<bool>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

/// Public account shape; the password hash never leaves the server.
pub fn user_to_json(user: &User) -> serde_json::Value {
    json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "first_name": user.first_name,
        "last_name": user.last_name,
        "phone": user.phone,
        "role": user.role,
        "created_at": user.created_at,
        "updated_at": user.updated_at,
    })
}

pub fn settings_to_json(settings: &UserSettings) -> serde_json::Value {
    json!({
        "user_id": settings.user_id,
        "low_stock_alerts": settings.low_stock_alerts,
        "stock_update_notifications": settings.stock_update_notifications,
        "dark_mode": settings.dark_mode,
        "language": settings.language,
        "currency": settings.currency,
        "updated_at": settings.updated_at,
    })
}

pub fn product_to_json(product: &Product) -> serde_json::Value {
    json!({
        "id": product.id,
        "name": product.name,
        "description": product.description,
        "price": product.price,
        "category": product.category,
        "tags": product.tags,
        "quantity": product.quantity,
        "low_stock_threshold": product.low_stock_threshold,
        "low_stock": product.is_low_stock(),
        "featured": product.featured,
        "created_at": product.created_at,
        "updated_at": product.updated_at,
    })
}

pub fn notification_to_json(notification: &Notification) -> serde_json::Value {
    json!({
        "id": notification.id,
        "user_id": notification.user_id,
        "type": notification.kind,
        "title": notification.title,
        "message": notification.message,
        "read": notification.read,
        "data": notification.data,
        "created_at": notification.created_at,
    })
}

/// `performed_by` is joined against the user store; the username is null when
/// the account has since been deleted.
pub fn history_record_to_json(
    record: &InventoryHistoryRecord,
    performed_by: Option<&User>,
) -> serde_json::Value {
    json!({
        "id": record.id,
        "product_id": record.product_id,
        "action": record.action,
        "quantity": record.quantity,
        "previous_quantity": record.previous_quantity,
        "new_quantity": record.new_quantity,
        "performed_by": {
            "id": record.performed_by,
            "username": performed_by.map(|u| u.username.clone()),
        },
        "notes": record.notes,
        "created_at": record.created_at,
    })
}
