//! AES-256-GCM authenticated encryption for token secrets.
//!
//! Every call derives its own key from `(password, fresh salt)` and draws
//! a fresh random IV, so encrypting the same secret twice never yields the
//! same ciphertext. The 16-byte GCM tag is kept detached so the storage
//! layer persists all four bundle fields side by side, exactly as the
//! record schema stores them.

use aes_gcm::aead::consts::U16;
use aes_gcm::aes::Aes256;
use aes_gcm::{AeadInPlace, AesGcm, KeyInit, Nonce, Tag};
use rand::rngs::OsRng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::crypto::kdf::{self, KeyPurpose, SALT_LENGTH};
use crate::error::{Result, VaultError};

/// AES-256-GCM with the 16-byte IV the record schema stores.
type VaultAead = AesGcm<Aes256, U16>;

/// IV length in bytes (128-bit, fixed by the stored record format).
pub const IV_LENGTH: usize = 16;

/// Authentication tag length in bytes (128-bit).
pub const TAG_LENGTH: usize = 16;

/// The encrypted form of a single token secret.
///
/// All four fields must be persisted together; losing any one makes the
/// ciphertext permanently unrecoverable. The core hands out raw bytes —
/// transport encoding (e.g. base64) is the storage layer's concern.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedBundle {
    /// AES-256-GCM ciphertext, same length as the plaintext.
    pub ciphertext: Vec<u8>,
    /// 16-byte IV, unique per encryption call.
    pub iv: [u8; IV_LENGTH],
    /// 16-byte GCM tag over the ciphertext.
    pub auth_tag: [u8; TAG_LENGTH],
    /// 32-byte salt used to re-derive the key at decryption time.
    pub salt: [u8; SALT_LENGTH],
}

/// Encrypt a plaintext secret under the given password.
///
/// Generates a fresh 32-byte salt and 16-byte IV for this call, derives a
/// 256-bit key via scrypt, and returns the detached-tag bundle. Two calls
/// with identical inputs produce different ciphertext, IV, and salt.
///
/// # Errors
///
/// Returns [`VaultError::Derivation`] if key derivation fails.
///
/// # Examples
///
/// ```
/// use tokenvault_core::crypto::cipher::{decrypt, encrypt};
///
/// let bundle = encrypt("sk-live-1234", "master-password").unwrap();
/// let plaintext = decrypt(&bundle, "master-password").unwrap();
/// assert_eq!(plaintext.as_str(), "sk-live-1234");
/// ```
pub fn encrypt(plaintext: &str, password: &str) -> Result<EncryptedBundle> {
    let salt = kdf::generate_salt();
    let key = kdf::derive(password, &salt, KeyPurpose::DataKey)?;

    let mut iv = [0u8; IV_LENGTH];
    OsRng.fill_bytes(&mut iv);

    let cipher = VaultAead::new_from_slice(key.as_bytes())
        .map_err(|_| VaultError::Crypto("Cipher key has invalid length".to_string()))?;

    // Encrypt in place: the buffer starts as plaintext and ends as
    // ciphertext of the same length.
    let mut buffer = plaintext.as_bytes().to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::<U16>::from_slice(&iv), b"", &mut buffer)
        .map_err(|_| VaultError::Crypto("AEAD encryption failed".to_string()))?;

    debug!(bytes = buffer.len(), "encrypted secret");

    Ok(EncryptedBundle {
        ciphertext: buffer,
        iv,
        auth_tag: tag.into(),
        salt,
    })
}

/// Decrypt a stored bundle with the given password.
///
/// Re-derives the key from `(password, bundle.salt)` and performs
/// authenticated decryption. Decryption is all-or-nothing: the tag is
/// verified before any plaintext is released.
///
/// # Errors
///
/// Returns [`VaultError::Authentication`] when the password is wrong or
/// any of ciphertext/IV/tag/salt was altered. The two causes are not
/// distinguishable — by the AEAD construction, and deliberately not in
/// the error surface either.
pub fn decrypt(bundle: &EncryptedBundle, password: &str) -> Result<Zeroizing<String>> {
    let key = kdf::derive(password, &bundle.salt, KeyPurpose::DataKey)?;

    let cipher = VaultAead::new_from_slice(key.as_bytes())
        .map_err(|_| VaultError::Crypto("Cipher key has invalid length".to_string()))?;

    let mut buffer = bundle.ciphertext.clone();
    cipher
        .decrypt_in_place_detached(
            Nonce::<U16>::from_slice(&bundle.iv),
            b"",
            &mut buffer,
            Tag::from_slice(&bundle.auth_tag),
        )
        .map_err(|_| VaultError::Authentication)?;

    // The tag authenticated bytes we produced ourselves, so they are
    // valid UTF-8 unless the stored record predates this cipher.
    match String::from_utf8(buffer) {
        Ok(plaintext) => Ok(Zeroizing::new(plaintext)),
        Err(e) => {
            let mut bytes = e.into_bytes();
            bytes.zeroize();
            Err(VaultError::Authentication)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encrypt_decrypt_round_trip() {
        let password = "test-password-123";
        let plaintext = "sk-test-abc123xyz789";

        let bundle = encrypt(plaintext, password).unwrap();
        let decrypted = decrypt(&bundle, password).unwrap();

        assert_eq!(decrypted.as_str(), plaintext);
    }

    #[test]
    fn test_ciphertext_differs_from_plaintext() {
        let bundle = encrypt("secret data", "test-password-123").unwrap();

        assert_ne!(bundle.ciphertext.as_slice(), b"secret data".as_slice());
        assert_eq!(bundle.ciphertext.len(), "secret data".len());
    }

    #[test]
    fn test_wrong_password_fails_decryption() {
        let bundle = encrypt("secret data", "correct-password-123").unwrap();

        let result = decrypt(&bundle, "wrong-password-456");
        assert!(matches!(result, Err(VaultError::Authentication)));
    }

    #[test]
    fn test_corrupted_ciphertext_fails_decryption() {
        let password = "test-password-123";
        let mut bundle = encrypt("secret data", password).unwrap();

        let mid = bundle.ciphertext.len() / 2;
        bundle.ciphertext[mid] ^= 0xFF;

        let result = decrypt(&bundle, password);
        assert!(matches!(result, Err(VaultError::Authentication)));
    }
}
