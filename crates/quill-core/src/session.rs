//! Session token storage.
//!
//! The session is a single bearer token persisted to one file under the
//! Quill home directory. Its presence is the only client-side signal that
//! the user is authenticated; there is no expiry or refresh. A stale token
//! is only discovered when a protected API call fails.
//!
//! The store is an explicit object injected into whoever needs it, with
//! one owner responsible for mutation. Reads always go to disk so a clear
//! performed elsewhere is visible to the next call immediately.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::paths;

/// File-backed holder of the current authentication token.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    /// Opens the store at the default token path (${QUILL_HOME}/token).
    pub fn open() -> Self {
        Self::at(paths::token_path())
    }

    /// Opens the store at an explicit path.
    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Returns the current token, or None if logged out.
    pub fn get(&self) -> Option<String> {
        let contents = fs::read_to_string(&self.path).ok()?;
        let token = contents.trim();
        (!token.is_empty()).then(|| token.to_string())
    }

    /// Persists a new token, replacing any previous one.
    pub fn set(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, token)
            .with_context(|| format!("Failed to write token to {}", self.path.display()))
    }

    /// Removes the token. A no-op if none is stored.
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove token at {}", self.path.display())),
        }
    }

    /// Returns true if a token is currently stored.
    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}
