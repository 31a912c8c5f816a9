//! Master-password gate.
//!
//! State machine: `Unset → Set`, with every `verify` call running
//! `Set → Verifying → {Granted | Denied} → Set`. At most one master
//! credential exists per gate; once set there is no clear, update, or
//! rotation path.

use std::sync::RwLock;

use secrecy::{ExposeSecret, SecretBox};
use tracing::debug;
use zeroize::Zeroize;

use crate::crypto::kdf::{self, KeyPurpose, PASSWORD_HASH_LENGTH, SALT_LENGTH};
use crate::error::{Result, VaultError};

/// The stored master credential: a scrypt hash and the salt it was
/// derived with. The hash is boxed behind [`SecretBox`] so it is zeroized
/// on drop and redacted from Debug output.
struct MasterCredential {
    hash: SecretBox<[u8; PASSWORD_HASH_LENGTH]>,
    salt: [u8; SALT_LENGTH],
}

impl MasterCredential {
    fn new(derived: &kdf::DerivedKey, salt: [u8; SALT_LENGTH]) -> Self {
        let mut hash = [0u8; PASSWORD_HASH_LENGTH];
        hash.copy_from_slice(derived.as_bytes());
        let credential = Self {
            hash: SecretBox::new(Box::new(hash)),
            salt,
        };
        hash.zeroize();
        credential
    }
}

/// Gate guarding access to the application surface.
///
/// Owns the single master credential as explicit, injected state rather
/// than module-level globals. Cheap to share behind an `Arc`; all methods
/// take `&self`.
#[derive(Default)]
pub struct MasterPasswordGate {
    credential: RwLock<Option<MasterCredential>>,
}

impl MasterPasswordGate {
    /// Create a gate in the `Unset` state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a master password has been set up.
    #[must_use]
    pub fn is_set(&self) -> bool {
        self.credential
            .read()
            .expect("master credential lock poisoned")
            .is_some()
    }

    /// Set up the master password (first-time setup).
    ///
    /// Derives a 64-byte verification hash with a fresh 32-byte salt and
    /// stores both. The slow derivation runs outside the lock; the
    /// `Unset → Set` transition itself is an atomic check-then-set under
    /// the write lock, so of two racing setup calls exactly one wins and
    /// the other fails with no side effect.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::AlreadySet`] if a credential already exists,
    /// or [`VaultError::Derivation`] if hashing fails.
    pub fn setup(&self, password: &str) -> Result<()> {
        if self.is_set() {
            return Err(VaultError::AlreadySet);
        }

        let salt = kdf::generate_salt();
        let derived = kdf::derive(password, &salt, KeyPurpose::PasswordHash)?;
        let credential = MasterCredential::new(&derived, salt);

        let mut guard = self
            .credential
            .write()
            .expect("master credential lock poisoned");
        if guard.is_some() {
            // Lost the race against a concurrent setup.
            return Err(VaultError::AlreadySet);
        }
        *guard = Some(credential);
        drop(guard);

        debug!("master password configured");
        Ok(())
    }

    /// Verify a presented password against the stored credential.
    ///
    /// Re-derives the hash with the stored salt and compares in constant
    /// time. No lockout or rate limiting is applied here; callers decide
    /// their own throttling policy.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::NotSet`] before setup,
    /// [`VaultError::InvalidPassword`] on mismatch, or
    /// [`VaultError::Derivation`] if hashing fails.
    pub fn verify(&self, password: &str) -> Result<()> {
        // The credential is immutable once set, so copying the salt out
        // and re-deriving without the lock held is safe.
        let salt = {
            let guard = self
                .credential
                .read()
                .expect("master credential lock poisoned");
            match guard.as_ref() {
                Some(credential) => credential.salt,
                None => return Err(VaultError::NotSet),
            }
        };

        let derived = kdf::derive(password, &salt, KeyPurpose::PasswordHash)?;

        let guard = self
            .credential
            .read()
            .expect("master credential lock poisoned");
        let Some(credential) = guard.as_ref() else {
            return Err(VaultError::NotSet);
        };

        if constant_time_eq(derived.as_bytes(), credential.hash.expose_secret()) {
            debug!("master password verified");
            Ok(())
        } else {
            debug!("master password verification failed");
            Err(VaultError::InvalidPassword)
        }
    }
}

impl std::fmt::Debug for MasterPasswordGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MasterPasswordGate")
            .field("is_set", &self.is_set())
            .finish()
    }
}

/// Constant-time comparison for hash material.
///
/// Comparison time is independent of where the first mismatching byte
/// occurs, so repeated verification attempts leak no partial-match
/// information. The early return on length mismatch is acceptable because
/// hash lengths are public knowledge — the constant-time property
/// protects the *hash value*.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
