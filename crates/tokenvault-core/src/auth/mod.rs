//! Master-password authentication for Tokenvault.
//!
//! The gate answers exactly one question — "is this the master password?"
//! — once per session. It never persists the plaintext password and never
//! gates individual record decryption; every decrypt call independently
//! requires the same password to succeed.

pub mod gate;
pub mod session;

pub use gate::MasterPasswordGate;
pub use session::generate_session_token;
