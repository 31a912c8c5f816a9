//! Key derivation using scrypt.
//!
//! This module derives symmetric keys and password-verification hashes
//! from the master password using scrypt, which is memory-hard and
//! resistant to GPU-based attacks.

use rand::rngs::OsRng;
use rand::RngCore;
use tracing::warn;
use zeroize::Zeroizing;

use crate::error::{Result, VaultError};

/// scrypt parameters.
///
/// These values balance security and usability:
/// - Cost: 2^17 iterations
/// - Block size: 8
/// - Parallelism: 1 (single-threaded)
///
/// Each derivation touches roughly 128 MB of memory and blocks the caller
/// for hundreds of milliseconds. The parameters are fixed; changing them
/// would orphan every previously derived hash and record key.
const SCRYPT_LOG_N: u8 = 17;
const SCRYPT_R: u32 = 8;
const SCRYPT_P: u32 = 1;

/// Length of salts fed into derivation, in bytes.
pub const SALT_LENGTH: usize = 32;

/// Length of a derived cipher key (32 bytes = 256 bits for AES-256-GCM).
pub const DATA_KEY_LENGTH: usize = 32;

/// Length of a derived password-verification hash (64 bytes = 512 bits).
pub const PASSWORD_HASH_LENGTH: usize = 64;

/// What a derived key will be used for.
///
/// The purpose fixes the output length: 32 bytes for a cipher key, 64
/// bytes for a password-verification hash. The differing lengths are
/// deliberate domain separation — a stored verification hash is never
/// byte-identical to a usable cipher key, even under password reuse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPurpose {
    /// 32-byte symmetric key for record encryption
    DataKey,
    /// 64-byte hash stored by the master-password gate
    PasswordHash,
}

impl KeyPurpose {
    /// Output length in bytes for this purpose.
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            KeyPurpose::DataKey => DATA_KEY_LENGTH,
            KeyPurpose::PasswordHash => PASSWORD_HASH_LENGTH,
        }
    }
}

/// A key derived from the master password.
///
/// Key material is zeroized from memory when dropped, reducing the window
/// of exposure. Length depends on the [`KeyPurpose`] it was derived for.
pub struct DerivedKey {
    bytes: Zeroizing<Vec<u8>>,
}

impl DerivedKey {
    /// Get a reference to the raw key bytes.
    ///
    /// # Security
    ///
    /// Avoid storing or logging this value. Use only for immediate
    /// cryptographic operations.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}

/// Derive a key from the master password using scrypt.
///
/// # Arguments
///
/// * `password` - The password to derive from
/// * `salt` - Random salt (unique per record or per credential)
/// * `purpose` - Selects the output length (see [`KeyPurpose`])
///
/// # Security
///
/// - Same `(password, salt, purpose)` always produces the same key; this
///   determinism is what allows existing records to be decrypted and
///   stored hashes to be re-verified.
/// - Different salts produce different keys, so the salt must be stored
///   with whatever the key protects.
/// - Derivation never fails because a password is "wrong" — correctness
///   is only observable one layer up, at tag verification or hash
///   comparison.
///
/// # Errors
///
/// Returns [`VaultError::Derivation`] if the underlying scrypt call
/// cannot run (parameter rejection or resource exhaustion).
pub fn derive(password: &str, salt: &[u8; SALT_LENGTH], purpose: KeyPurpose) -> Result<DerivedKey> {
    let params = scrypt::Params::new(SCRYPT_LOG_N, SCRYPT_R, SCRYPT_P, purpose.output_len())
        .map_err(|e| VaultError::Derivation(format!("Invalid scrypt parameters: {}", e)))?;

    let mut bytes = Zeroizing::new(vec![0u8; purpose.output_len()]);
    scrypt::scrypt(password.as_bytes(), salt, &params, &mut bytes).map_err(|e| {
        warn!("scrypt derivation failed: {}", e);
        VaultError::Derivation(format!("Key derivation failed: {}", e))
    })?;

    Ok(DerivedKey { bytes })
}

/// Generate a fresh random salt for key derivation.
///
/// Called once per encryption and once at master-password setup. Salts
/// are not secret but must never be reused.
#[must_use]
pub fn generate_salt() -> [u8; SALT_LENGTH] {
    let mut salt = [0u8; SALT_LENGTH];
    OsRng.fill_bytes(&mut salt);
    salt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_derivation_deterministic() {
        let password = "test-password-123";
        let salt = generate_salt();

        let key1 = derive(password, &salt, KeyPurpose::DataKey).unwrap();
        let key2 = derive(password, &salt, KeyPurpose::DataKey).unwrap();

        // Same password + salt should produce identical keys
        assert_eq!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_different_salt_different_key() {
        let password = "test-password-123";
        let salt1 = generate_salt();
        let salt2 = generate_salt();

        let key1 = derive(password, &salt1, KeyPurpose::DataKey).unwrap();
        let key2 = derive(password, &salt2, KeyPurpose::DataKey).unwrap();

        assert_ne!(key1.as_bytes(), key2.as_bytes());
    }

    #[test]
    fn test_output_length_follows_purpose() {
        let salt = generate_salt();

        let data_key = derive("pw", &salt, KeyPurpose::DataKey).unwrap();
        let password_hash = derive("pw", &salt, KeyPurpose::PasswordHash).unwrap();

        assert_eq!(data_key.as_bytes().len(), DATA_KEY_LENGTH);
        assert_eq!(password_hash.as_bytes().len(), PASSWORD_HASH_LENGTH);
    }

    #[test]
    fn test_generated_salts_are_unique() {
        let salt1 = generate_salt();
        let salt2 = generate_salt();

        assert_ne!(salt1, salt2);
    }

    #[test]
    fn test_derived_key_debug_redacts() {
        let salt = generate_salt();
        let key = derive("test-password-123", &salt, KeyPurpose::DataKey).unwrap();

        let debug_output = format!("{:?}", key);
        assert!(debug_output.contains("REDACTED"));

        // Should NOT contain actual key bytes
        let key_hex = hex::encode(&key.as_bytes()[..4]);
        assert!(!debug_output.contains(&key_hex));
    }
}
