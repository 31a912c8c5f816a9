//! Error types for Tokenvault core operations.
//!
//! This module defines the error hierarchy for the cryptographic core and
//! the master-password gate. Errors are descriptive at the core level; the
//! surrounding application layer maps them to user-facing messages.
//!
//! Decryption failures deliberately carry a single, cause-free message:
//! the cipher cannot tell a wrong password from tampered ciphertext, and
//! reporting them differently would hand an attacker an oracle.

use thiserror::Error;

/// Result type alias for Tokenvault operations.
pub type Result<T> = std::result::Result<T, VaultError>;

/// Core error type for Tokenvault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    /// Key derivation failed (parameter or resource failure, never a
    /// "wrong" password)
    #[error("Key derivation failed: {0}")]
    Derivation(String),

    /// Authenticated decryption failed: tag mismatch from a wrong
    /// password or altered ciphertext/IV/tag/salt
    #[error("wrong password or corrupted data")]
    Authentication,

    /// Master password setup attempted while a credential already exists
    #[error("Master password already set")]
    AlreadySet,

    /// Master password verification attempted before setup
    #[error("Master password not set")]
    NotSet,

    /// Master password verification failed
    #[error("Invalid password")]
    InvalidPassword,

    /// Encryption-side cipher failure (fallback)
    #[error("Encryption error: {0}")]
    Crypto(String),
}
