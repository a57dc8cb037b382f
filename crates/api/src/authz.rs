use axum::http::StatusCode;

use stockroom_auth::{UserRole, authorize_role};

use crate::app::errors;
use crate::context::ActorContext;

/// Roles that may create, edit, and delete catalog products.
pub const CATALOG_MANAGERS: &[UserRole] = &[UserRole::Owner, UserRole::SuperAdmin];

/// Roles that may adjust stock and read the audit trail.
pub const INVENTORY_ADJUSTERS: &[UserRole] =
    &[UserRole::Storekeeper, UserRole::Owner, UserRole::SuperAdmin];

/// Route-level capability check; the error is already a response.
pub fn require_role(
    actor: &ActorContext,
    allowed: &[UserRole],
) -> Result<(), axum::response::Response> {
    authorize_role(actor.role(), allowed)
        .map_err(|e| errors::json_error(StatusCode::FORBIDDEN, "forbidden", e.to_string()))
}
