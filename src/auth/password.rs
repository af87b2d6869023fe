/// Password Hashing and Verification
///
/// Thin wrappers over bcrypt. Strength rules live in `validators`.

use bcrypt::{hash, verify};

use crate::error::AppError;

/// Hash a password using bcrypt at the given cost
///
/// # Errors
/// Returns error if bcrypt rejects the cost or hashing fails
pub fn hash_password(password: &str, cost: u32) -> Result<String, AppError> {
    hash(password, cost).map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
}

/// Verify a password against its hash
///
/// A stored hash that bcrypt cannot parse counts as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> bool {
    match verify(password, hash) {
        Ok(valid) => valid,
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be verified");
            false
        }
    }
}
