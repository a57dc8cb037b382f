use serde::{Deserialize, Serialize};

use stockroom_core::UserId;

use crate::UserRole;

/// Access-token claims (transport-agnostic).
///
/// This is the minimal set of claims the backend expects once a token has
/// been decoded and its signature verified. The role claim is advisory:
/// request handling re-reads the user record and takes the role from there,
/// so a stale token cannot carry a revoked capability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the authenticated user.
    pub sub: UserId,

    /// Role at issuance time.
    pub role: UserRole,

    /// Issued-at (unix seconds).
    pub iat: i64,

    /// Expiration (unix seconds).
    pub exp: i64,
}
