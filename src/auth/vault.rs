//! Secure storage for the session token.
//!
//! The credential itself never touches the session record file; it lives in
//! the OS keychain via the `keyring` crate. The `TokenVault` trait exists so
//! the store can be exercised in tests (and headless environments) with an
//! in-memory vault.

use std::sync::Mutex;

use anyhow::{anyhow, Context, Result};
use keyring::Entry;

const SERVICE_NAME: &str = "voyager";
const TOKEN_ACCOUNT: &str = "session-token";

/// Storage for the one credential token of this installation.
pub trait TokenVault {
    fn store(&self, token: &str) -> Result<()>;

    /// Returns `None` when no token is stored.
    fn get(&self) -> Result<Option<String>>;

    /// Remove the stored token. Removing an absent token is not an error.
    fn delete(&self) -> Result<()>;
}

/// OS keychain backed vault.
pub struct KeychainVault;

impl KeychainVault {
    fn entry() -> Result<Entry> {
        Entry::new(SERVICE_NAME, TOKEN_ACCOUNT).context("Failed to create keyring entry")
    }
}

impl TokenVault for KeychainVault {
    fn store(&self, token: &str) -> Result<()> {
        Self::entry()?
            .set_password(token)
            .context("Failed to store token in keychain")
    }

    fn get(&self) -> Result<Option<String>> {
        match Self::entry()?.get_password() {
            Ok(token) => Ok(Some(token)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(e).context("Failed to read token from keychain"),
        }
    }

    fn delete(&self) -> Result<()> {
        match Self::entry()?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(e).context("Failed to delete token from keychain"),
        }
    }
}

/// In-memory vault for tests and environments without a keychain.
#[derive(Default)]
pub struct MemoryVault(Mutex<Option<String>>);

impl MemoryVault {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        Self(Mutex::new(Some(token.to_string())))
    }
}

impl TokenVault for MemoryVault {
    fn store(&self, token: &str) -> Result<()> {
        let mut slot = self.0.lock().map_err(|_| anyhow!("Vault mutex poisoned"))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn get(&self) -> Result<Option<String>> {
        let slot = self.0.lock().map_err(|_| anyhow!("Vault mutex poisoned"))?;
        Ok(slot.clone())
    }

    fn delete(&self) -> Result<()> {
        let mut slot = self.0.lock().map_err(|_| anyhow!("Vault mutex poisoned"))?;
        *slot = None;
        Ok(())
    }
}
