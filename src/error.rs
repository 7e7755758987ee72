//! Error taxonomy for credential operations.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during signup, login, and store I/O.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("username cannot be empty")]
    EmptyUsername,

    #[error("passwords do not match")]
    PasswordMismatch,

    #[error("username '{0}' already exists")]
    AlreadyExists(String),

    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("stored hash is malformed (expected 128 hex characters)")]
    MalformedHash,

    #[error("credential store at '{}' is unreadable: {source}", .path.display())]
    StoreUnreadable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
