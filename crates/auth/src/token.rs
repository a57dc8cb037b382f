use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use stockroom_core::UserId;

use crate::{AccessClaims, UserRole};

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),
}

/// HS256 access-token codec: issues and verifies [`AccessClaims`].
pub struct Hs256TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl Hs256TokenCodec {
    /// Default token lifetime (matches the 30-day sessions the product uses).
    pub const DEFAULT_TTL_DAYS: i64 = 30;

    pub fn new(secret: &[u8]) -> Self {
        Self::with_ttl(secret, Duration::days(Self::DEFAULT_TTL_DAYS))
    }

    pub fn with_ttl(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            ttl,
        }
    }

    /// Issue a signed token for a user.
    pub fn issue(&self, user_id: UserId, role: UserRole) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = AccessClaims {
            sub: user_id,
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Invalid(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims.
    pub fn verify(&self, token: &str) -> Result<AccessClaims, TokenError> {
        jsonwebtoken::decode::<AccessClaims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_and_verify_round_trip() {
        let codec = Hs256TokenCodec::new(b"test-secret");
        let user_id = UserId::new();

        let token = codec.issue(user_id, UserRole::Storekeeper).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, UserRole::Storekeeper);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let codec = Hs256TokenCodec::new(b"secret-a");
        let other = Hs256TokenCodec::new(b"secret-b");

        let token = codec.issue(UserId::new(), UserRole::Customer).unwrap();
        assert!(matches!(other.verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Negative TTL forces exp into the past; decode leeway is 60s by
        // default, so go well past it.
        let codec = Hs256TokenCodec::with_ttl(b"test-secret", Duration::minutes(-5));
        let token = codec.issue(UserId::new(), UserRole::Customer).unwrap();
        assert!(matches!(codec.verify(&token), Err(TokenError::Expired)));
    }
}
