/// Authentication module
///
/// Handles JWT token generation/validation, password hashing,
/// bearer header parsing and token revocation.

mod bearer;
mod blacklist;
mod claims;
pub mod jwt;
mod password;

pub use bearer::extract_bearer_token;
pub use blacklist::TokenBlacklist;
pub use claims::Claims;
pub use jwt::{decode_token, encode_token, issue_access_token, IssuedToken};
pub use password::hash_password;
pub use password::verify_password;
