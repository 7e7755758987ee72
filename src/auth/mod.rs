//! Credential hashing and storage.
//!
//! Provides:
//! - Password hashing and verification (PBKDF2-HMAC-SHA256, 100k rounds +
//!   per-user random salt, hex-encoded `salt || key` storage format)
//! - A flat-file credential store with signup/login operations
//!
//! ## Design Decisions
//! - The stored-hash format is a plain 128-character hex string rather than a
//!   PHC string: the store predates this crate and the format is kept
//!   compatible with existing record files.
//! - Login failures collapse to a single undifferentiated error so callers
//!   cannot distinguish an unknown username from a wrong password.

pub mod hasher;
pub mod store;

pub use store::{CredentialStore, UserMap};
