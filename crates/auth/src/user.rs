use chrono::{DateTime, Utc};

use stockroom_core::{DomainError, DomainResult, UserId};

use crate::UserRole;

/// A user account record.
///
/// `password_hash` is an argon2id PHC string; the plaintext never touches
/// this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating a user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: UserRole,
}

impl User {
    pub fn create(input: NewUser) -> DomainResult<Self> {
        if input.username.trim().is_empty() {
            return Err(DomainError::validation("username cannot be empty"));
        }
        if input.email.trim().is_empty() || !input.email.contains('@') {
            return Err(DomainError::validation("email is not valid"));
        }

        let now = Utc::now();
        Ok(Self {
            id: UserId::new(),
            username: input.username.trim().to_string(),
            email: input.email.trim().to_lowercase(),
            password_hash: input.password_hash,
            first_name: input.first_name,
            last_name: input.last_name,
            phone: input.phone,
            role: input.role,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
