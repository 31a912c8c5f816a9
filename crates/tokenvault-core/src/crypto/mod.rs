//! Cryptographic operations for Tokenvault.
//!
//! This module provides key derivation and authenticated encryption using
//! well-audited libraries:
//! - **scrypt**: Memory-hard key derivation function
//! - **AES-256-GCM**: Authenticated encryption with a detached tag
//!
//! ## Security Model
//!
//! - Every encryption call draws a fresh random salt and IV, so identical
//!   secrets encrypted under the same password never produce identical
//!   ciphertext.
//! - Keys are derived per call and never cached; key material is zeroized
//!   from memory on drop.
//! - No plaintext passwords are stored.
//!
//! ## Threat Model
//!
//! We defend against:
//! - Theft of the encrypted token records
//! - Offline brute-force attacks on the master password
//!
//! We do NOT defend against:
//! - Compromised OS / keylogger
//! - Access to an unlocked session / memory

pub mod cipher;
pub mod kdf;

pub use cipher::{decrypt, encrypt, EncryptedBundle};
pub use kdf::{derive, generate_salt, DerivedKey, KeyPurpose};
