use thiserror::Error;

use crate::UserRole;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("role '{0}' is not authorized to access this resource")]
    Forbidden(UserRole),
}

/// Role-based capability check.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
///
/// The caller supplies the already-authenticated actor's role; this layer
/// never re-derives identity from shared state.
pub fn authorize_role(role: UserRole, allowed: &[UserRole]) -> Result<(), AuthzError> {
    if allowed.contains(&role) {
        Ok(())
    } else {
        Err(AuthzError::Forbidden(role))
    }
}
