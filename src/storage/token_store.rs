/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 14/10/26
******************************************************************************/

//! Persisted credential store
//!
//! Holds exactly one [`Credential`]. The on-disk format is an internal
//! detail and may change between versions.
//!
//! The file store takes no lock: two clients working in the same directory
//! can overwrite each other's credential.

use crate::error::AppError;
use crate::model::auth::Credential;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Durable single-record storage for the current credential
pub trait CredentialStore: Send + Sync {
    /// Reads the stored credential, `None` when nothing is stored
    fn load(&self) -> Result<Option<Credential>, AppError>;

    /// Replaces the stored credential
    fn save(&self, credential: &Credential) -> Result<(), AppError>;

    /// Removes the stored credential
    fn clear(&self) -> Result<(), AppError>;
}

/// Stores the credential as JSON in a single file
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Creates a store backed by `path`; the file is created on first save
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CredentialStore for FileCredentialStore {
    fn load(&self) -> Result<Option<Credential>, AppError> {
        if !self.path.exists() {
            debug!("No credential file at {}", self.path.display());
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&self.path)?;
        let credential: Credential = serde_json::from_str(&contents)?;
        debug!("Loaded credential from {}", self.path.display());
        Ok(Some(credential))
    }

    fn save(&self, credential: &Credential) -> Result<(), AppError> {
        if !credential.has_access_token() {
            warn!("Refusing to persist a credential without access token");
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(credential)?;
        std::fs::write(&self.path, contents)?;
        debug!("Saved credential to {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        if self.path.exists() {
            std::fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}

/// Keeps the credential in memory only
///
/// For embedding applications that manage persistence themselves, and for tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    credential: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding `credential`
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: Mutex::new(Some(credential)),
        }
    }

    fn slot(&self) -> std::sync::MutexGuard<'_, Option<Credential>> {
        // A poisoned slot still holds a whole credential, never a partial one
        self.credential
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>, AppError> {
        Ok(self.slot().clone())
    }

    fn save(&self, credential: &Credential) -> Result<(), AppError> {
        if !credential.has_access_token() {
            warn!("Refusing to persist a credential without access token");
            return Ok(());
        }
        *self.slot() = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), AppError> {
        *self.slot() = None;
        Ok(())
    }
}
