use crate::error::AuthError;

/// Pull the token out of an `Authorization: Bearer <token>` header value.
///
/// The scheme is case-insensitive; anything other than exactly two parts is rejected.
pub fn extract_bearer_token(header_value: &str) -> Result<&str, AuthError> {
    let mut parts = header_value.split_whitespace();

    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AuthError::TokenInvalid(
            "Invalid authorization header format".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def.ghi").unwrap(), "abc.def.ghi");
        assert_eq!(extract_bearer_token("bearer abc").unwrap(), "abc");
        assert_eq!(extract_bearer_token("  BEARER   abc ").unwrap(), "abc");
    }

    #[test]
    fn test_rejects_malformed_headers() {
        for header in ["", "Bearer", "BearerToken", "Basic dXNlcjpwYXNz", "Bearer a b"] {
            assert!(extract_bearer_token(header).is_err(), "should reject {:?}", header);
        }
    }
}
