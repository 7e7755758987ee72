//! credkeep: a local user-credential store with a CLI signup/login flow.
//!
//! Provides:
//! - Salted password hashing (PBKDF2-HMAC-SHA256, 100k rounds + per-user salt)
//! - A flat-file credential store (one JSON object, username → stored hash)
//! - Signup and login operations with a uniform invalid-credentials failure
//! - An interactive menu plus one-shot `signup` / `login` subcommands
//!
//! ## Design Decisions
//! - The store is an explicit object constructed with its backing path; there
//!   is no implicit global state.
//! - An unreadable store file is surfaced as [`error::AuthError::StoreUnreadable`]
//!   instead of being treated as empty, so existing records are never silently
//!   discarded.
//! - Saves replace the backing file via write-to-temp-then-rename, so a crash
//!   mid-save leaves the previous contents intact.
//!
//! ## Limitations
//! - The load-modify-save cycle takes no file lock. Concurrent processes
//!   writing the same backing file are unsupported: the last save wins.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;

pub use auth::CredentialStore;
pub use error::AuthError;
