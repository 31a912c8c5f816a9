//! Opaque session tokens.

use rand::rngs::OsRng;
use rand::RngCore;

/// Raw length of a session token, in bytes (hex-encoded to 64 chars).
pub const SESSION_TOKEN_LENGTH: usize = 32;

/// Generate an opaque session token for an authenticated session.
///
/// The token carries no expiry or revocation; issuing, storing, and
/// invalidating it is the session layer's responsibility.
#[must_use]
pub fn generate_session_token() -> String {
    let mut bytes = [0u8; SESSION_TOKEN_LENGTH];
    OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_is_hex_of_expected_length() {
        let token = generate_session_token();

        assert_eq!(token.len(), SESSION_TOKEN_LENGTH * 2);
        assert!(hex::decode(&token).is_ok());
    }

    #[test]
    fn test_tokens_are_unique() {
        assert_ne!(generate_session_token(), generate_session_token());
    }
}
