/// JWT Token Generation and Validation
///
/// Signs access tokens with the configured HMAC algorithm and decodes them,
/// telling expired tokens apart from otherwise invalid ones.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::Claims;
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError};
use crate::models::User;

/// A freshly signed access token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub claims: Claims,
    /// Lifetime in seconds, as reported to the client
    pub expires_in: i64,
}

/// Generate a new access token for a user
///
/// # Errors
/// Returns error if the algorithm is misconfigured or signing fails
pub fn issue_access_token(user: &User, config: &JwtSettings) -> Result<IssuedToken, AppError> {
    let lifetime = config.access_token_lifetime();
    let claims = Claims::new(user.id, user.email.clone(), lifetime, config.issuer.clone());
    let token = encode_token(&claims, config)?;

    Ok(IssuedToken {
        token,
        claims,
        expires_in: lifetime.num_seconds(),
    })
}

/// Sign arbitrary claims with the configured secret and algorithm
pub fn encode_token(claims: &Claims, config: &JwtSettings) -> Result<String, AppError> {
    let algorithm = config.algorithm()?;

    encode(
        &Header::new(algorithm),
        claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Validate and extract claims from an access token
///
/// # Errors
/// `TokenExpired` once `exp` has passed, `TokenInvalid` for a bad signature,
/// wrong issuer or algorithm, or anything that is not a JWT
pub fn decode_token(token: &str, config: &JwtSettings) -> Result<Claims, AuthError> {
    let algorithm = config
        .algorithm()
        .map_err(|e| AuthError::TokenInvalid(e.to_string()))?;

    let mut validation = Validation::new(algorithm);
    validation.set_issuer(&[&config.issuer]);
    validation.set_required_spec_claims(&["exp", "iss", "sub"]);
    validation.leeway = 0;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => {
            tracing::debug!(error = %e, "JWT validation error");
            AuthError::TokenInvalid(e.to_string())
        }
    })
}
