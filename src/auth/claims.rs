/// JWT Claims structure
///
/// Payload of an access token: user identity, a unique token id used for
/// revocation, and the standard time/issuer claims (RFC 7519).

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AuthError;

/// JWT Claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// User email
    pub email: String,
    /// Token ID, the key stored in the blacklist on logout
    pub jti: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issuer
    pub iss: String,
}

impl Claims {
    /// Create new claims with user information
    ///
    /// # Arguments
    /// * `user_id` - User's UUID
    /// * `email` - User's email address
    /// * `lifetime` - How long the token stays valid from now
    /// * `issuer` - Issuer identifier
    pub fn new(user_id: Uuid, email: String, lifetime: Duration, issuer: String) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            email,
            jti: Uuid::new_v4().to_string(),
            iat: now,
            exp: now + lifetime.num_seconds(),
            iss: issuer,
        }
    }

    /// Extract user ID from claims
    ///
    /// # Errors
    /// Returns `TokenInvalid` if the subject is not a valid UUID
    pub fn user_id(&self) -> Result<Uuid, AuthError> {
        Uuid::parse_str(&self.sub)
            .map_err(|_| AuthError::TokenInvalid("Invalid token payload".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let user_id = Uuid::new_v4();
        let email = "test@example.com".to_string();
        let claims = Claims::new(user_id, email.clone(), Duration::minutes(30), "test".to_string());

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.email, email);
        assert_eq!(claims.iss, "test");
        assert_eq!(claims.exp - claims.iat, 1800);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn test_each_token_gets_a_unique_id() {
        let user_id = Uuid::new_v4();
        let a = Claims::new(user_id, "a@example.com".into(), Duration::minutes(5), "test".into());
        let b = Claims::new(user_id, "a@example.com".into(), Duration::minutes(5), "test".into());

        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_user_id_extraction() {
        let user_id = Uuid::new_v4();
        let claims = Claims::new(user_id, "test@example.com".into(), Duration::minutes(5), "test".into());

        assert_eq!(claims.user_id().unwrap(), user_id);
    }

    #[test]
    fn test_invalid_user_id() {
        let mut claims = Claims::new(
            Uuid::new_v4(),
            "test@example.com".to_string(),
            Duration::minutes(5),
            "test".to_string(),
        );
        claims.sub = "invalid-uuid".to_string();

        assert!(claims.user_id().is_err());
    }

    #[test]
    fn test_negative_lifetime_is_expired() {
        let claims = Claims::new(Uuid::new_v4(), "a@example.com".into(), Duration::minutes(-1), "t".into());
        assert!(claims.exp < Utc::now().timestamp());
    }
}
