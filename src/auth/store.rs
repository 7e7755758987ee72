//! Flat-file credential store.
//!
//! The backing file is a single UTF-8 JSON object mapping usernames to
//! 128-character hex stored hashes, pretty-printed with 4-space indentation:
//!
//! ```json
//! {
//!     "alice": "9f86d081...e592"
//! }
//! ```
//!
//! The file is created on first signup, rewritten on each successful signup,
//! and read on every login attempt. Saves go through a temp file in the same
//! directory followed by a rename, so a crash mid-save cannot truncate the
//! store. There is no file locking: concurrent writers are unsupported.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tempfile::NamedTempFile;

use crate::auth::hasher;
use crate::error::AuthError;

/// In-memory form of the store: username → stored hash.
pub type UserMap = BTreeMap<String, String>;

/// File-backed credential store.
///
/// Holds only the backing path; every operation is a one-shot
/// load-modify-save cycle with no retained state between calls.
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    /// Create a store over the given backing file. Performs no I/O.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the full user mapping from disk.
    ///
    /// A missing file is an empty store. A file that exists but cannot be
    /// parsed is surfaced as [`AuthError::StoreUnreadable`]; existing
    /// records are never silently discarded.
    pub fn load(&self) -> Result<UserMap, AuthError> {
        if !self.path.exists() {
            return Ok(UserMap::new());
        }
        let raw = std::fs::read(&self.path)?;
        serde_json::from_slice(&raw).map_err(|source| AuthError::StoreUnreadable {
            path: self.path.clone(),
            source,
        })
    }

    /// Write the full user mapping to disk, replacing the backing file.
    pub fn save(&self, users: &UserMap) -> Result<(), AuthError> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(&to_pretty_json(users)?)?;
        tmp.persist(&self.path).map_err(|e| AuthError::Io(e.error))?;
        Ok(())
    }

    /// Register a new user.
    ///
    /// Validates the trimmed username and the password confirmation, then
    /// hashes, inserts, and persists. A failed signup never mutates the store.
    pub fn signup(
        &self,
        username: &str,
        password: &str,
        confirm: &str,
    ) -> Result<(), AuthError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AuthError::EmptyUsername);
        }
        if password != confirm {
            return Err(AuthError::PasswordMismatch);
        }

        let mut users = self.load()?;
        if users.contains_key(username) {
            return Err(AuthError::AlreadyExists(username.to_string()));
        }

        users.insert(username.to_string(), hasher::hash(password));
        self.save(&users)?;

        tracing::info!(username, "user registered");
        Ok(())
    }

    /// Authenticate a user.
    ///
    /// An unknown username and a wrong password both fail with the same
    /// [`AuthError::InvalidCredentials`], so callers cannot enumerate
    /// registered usernames.
    pub fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let username = username.trim();
        let users = self.load()?;

        match users.get(username) {
            Some(stored) => {
                if hasher::verify(stored, password)? {
                    tracing::info!(username, "login succeeded");
                    Ok(())
                } else {
                    tracing::debug!(username, "login failed");
                    Err(AuthError::InvalidCredentials)
                }
            }
            None => {
                hasher::dummy_derive(password);
                tracing::debug!(username, "login failed");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Number of registered users.
    pub fn user_count(&self) -> Result<usize, AuthError> {
        Ok(self.load()?.len())
    }
}

/// Serialize the mapping as pretty-printed JSON with 4-space indentation.
fn to_pretty_json(users: &UserMap) -> Result<Vec<u8>, AuthError> {
    let mut buf = Vec::with_capacity(128);
    let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    users.serialize(&mut ser).map_err(std::io::Error::from)?;
    Ok(buf)
}
