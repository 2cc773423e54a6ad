//! Durable session state.
//!
//! The session is persisted in two halves: a JSON record file in the cache
//! directory (expiration, email hint, cached user) and the token itself in
//! the token vault. `load` enforces all-or-nothing semantics: if either half
//! is missing or fails to decode, both are cleared and the session is
//! reported as absent.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::User;

use super::vault::{KeychainVault, TokenVault};

/// Session record file name in cache directory
const SESSION_FILE: &str = "session.json";

/// The non-secret half of the persisted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(rename = "tokenExpiration")]
    pub token_expiration: DateTime<Utc>,
    /// Owning account's email, kept as a diagnostic hint.
    #[serde(rename = "userEmail")]
    pub user_email: String,
    #[serde(rename = "currentUser")]
    pub current_user: User,
}

/// A fully decoded persisted session: both halves were present and valid.
/// Expiry is not checked here; that is the session manager's call.
#[derive(Debug, Clone)]
pub struct PersistedSession {
    pub token: String,
    pub record: SessionRecord,
}

pub struct SessionStore<V: TokenVault> {
    cache_dir: PathBuf,
    vault: V,
}

impl SessionStore<KeychainVault> {
    /// Open the store backed by the OS keychain.
    pub fn open(cache_dir: PathBuf) -> Self {
        Self::new(cache_dir, KeychainVault)
    }
}

impl<V: TokenVault> SessionStore<V> {
    pub fn new(cache_dir: PathBuf, vault: V) -> Self {
        Self { cache_dir, vault }
    }

    /// Load the persisted session, or `None` if absent or partially decoded.
    ///
    /// Partial state is treated as absent: both halves are cleared before
    /// returning `None` so a later load cannot observe the leftovers.
    pub fn load(&self) -> Option<PersistedSession> {
        match self.try_load() {
            Ok(Some(session)) => Some(session),
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Discarding partially decoded session state");
                if let Err(e) = self.clear() {
                    warn!(error = %e, "Failed to clear session state after decode error");
                }
                None
            }
        }
    }

    fn try_load(&self) -> Result<Option<PersistedSession>> {
        let path = self.session_path();
        let token = self.vault.get()?;

        match (path.exists(), token) {
            (true, Some(token)) if !token.is_empty() => {
                let contents = std::fs::read_to_string(&path)
                    .context("Failed to read session record file")?;
                let record: SessionRecord =
                    serde_json::from_str(&contents).context("Failed to parse session record")?;
                Ok(Some(PersistedSession { token, record }))
            }
            (false, None) => Ok(None),
            // One half present without the other: inconsistent, clear both.
            _ => {
                self.clear()?;
                Ok(None)
            }
        }
    }

    /// Persist both halves of the session.
    pub fn save(&self, token: &str, record: &SessionRecord) -> Result<()> {
        let path = self.session_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(record)?;
        std::fs::write(&path, contents).context("Failed to write session record file")?;
        self.vault.store(token)?;
        Ok(())
    }

    /// Remove all persisted session state. Idempotent.
    pub fn clear(&self) -> Result<()> {
        let path = self.session_path();
        if path.exists() {
            std::fs::remove_file(&path).context("Failed to remove session record file")?;
        }
        self.vault.delete()?;
        Ok(())
    }

    fn session_path(&self) -> PathBuf {
        self.cache_dir.join(SESSION_FILE)
    }
}
