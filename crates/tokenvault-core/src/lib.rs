//! # Tokenvault Core
//!
//! Core library for Tokenvault - a personal vault for API tokens, encrypted
//! at rest under a single master password.
//!
//! This crate provides the cryptographic core and the master-password
//! authentication gate, independent of any storage backend or user
//! interface. Record storage, export, and presentation layers are external
//! collaborators that call into this crate through two surfaces:
//!
//! - **Cipher**: [`crypto::cipher::encrypt`] / [`crypto::cipher::decrypt`]
//!   exchange an [`EncryptedBundle`] whose four fields (ciphertext, IV,
//!   auth tag, salt) the collaborator persists verbatim.
//! - **Gate**: [`auth::MasterPasswordGate`] answers setup/verify once per
//!   session; it has no concept of records or sessions itself.
//!
//! ## Architecture
//!
//! - **crypto**: scrypt key derivation and AES-256-GCM authenticated
//!   encryption
//! - **auth**: master-password gate state machine and session token
//!   generation
//! - **error**: unified error type surfaced by both components

pub mod auth;
pub mod crypto;
pub mod error;

pub use auth::MasterPasswordGate;
pub use crypto::{decrypt, encrypt, EncryptedBundle};
pub use error::{Result, VaultError};

/// Core version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
