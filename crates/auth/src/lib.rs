//! `stockroom-auth` — authentication/authorization boundary.
//!
//! This crate is intentionally decoupled from HTTP and storage: tokens,
//! password hashing, role policy, and the account records themselves.

pub mod authorize;
pub mod claims;
pub mod password;
pub mod roles;
pub mod settings;
pub mod token;
pub mod user;

pub use authorize::{AuthzError, authorize_role};
pub use claims::AccessClaims;
pub use password::{Argon2Hasher, PasswordError, PasswordHasher};
pub use roles::UserRole;
pub use settings::UserSettings;
pub use token::{Hs256TokenCodec, TokenError};
pub use user::{NewUser, User};
