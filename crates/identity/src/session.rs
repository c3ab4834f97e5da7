//! Persisted session account store.
//!
//! The process-wide owner of "who is logged in". Every surface reads it;
//! nothing mutates it except the three lifecycle operations below, so a
//! role change or logout is visible everywhere at once.

use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard, PoisonError};

use thiserror::Error;

use clove_core::SessionAccount;

/// Errors that can occur when persisting the session.
///
/// Only `set` surfaces these; reads never fail - damaged persisted data is
/// treated as "not logged in", not as a crash.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Writing the session file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the account failed.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// File-backed holder of the authenticated account.
///
/// Created once at process start and shared by reference. The on-disk
/// format is a single JSON object matching [`SessionAccount`].
pub struct SessionStore {
    path: PathBuf,
    current: Mutex<Option<SessionAccount>>,
}

impl SessionStore {
    /// Create a store over the given file path. Does not touch the disk;
    /// call [`SessionStore::load`] at process start.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            current: Mutex::new(None),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Option<SessionAccount>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Read the persisted account, if any.
    ///
    /// A missing file means no session. An unreadable or unparseable file
    /// is treated the same way - and cleared, so the next start does not
    /// trip over it again.
    pub fn load(&self) -> Option<SessionAccount> {
        let account = match std::fs::read_to_string(&self.path) {
            Ok(contents) => match serde_json::from_str::<SessionAccount>(&contents) {
                Ok(account) => Some(account),
                Err(err) => {
                    tracing::warn!(%err, path = %self.path.display(), "discarding unparseable session file");
                    self.remove_file();
                    None
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(%err, path = %self.path.display(), "could not read session file");
                None
            }
        };

        *self.lock() = account.clone();
        account
    }

    /// Replace the current account wholesale and persist it.
    ///
    /// Used after a successful login or registration; a role-changing
    /// login goes through here too, there is no partial update.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if the account cannot be written. The
    /// in-memory account is still replaced, so the session works for this
    /// process lifetime even on a read-only disk.
    pub fn set(&self, account: SessionAccount) -> Result<(), SessionError> {
        *self.lock() = Some(account.clone());

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(&account)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }

    /// Remove the account from memory and disk. Used on logout, account
    /// deletion, and when `load` finds garbage.
    pub fn clear(&self) {
        *self.lock() = None;
        self.remove_file();
    }

    /// The current account, if logged in.
    pub fn current(&self) -> Option<SessionAccount> {
        self.lock().clone()
    }

    fn remove_file(&self) {
        if let Err(err) = std::fs::remove_file(&self.path)
            && err.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(%err, path = %self.path.display(), "could not remove session file");
        }
    }
}
