//! Authentication module: the session lifecycle and its collaborators.
//!
//! This module provides:
//! - `SessionManager`: single authority for the live session
//! - `AuthCoordinator`: login/refresh/register/logout intents against the API
//! - `SessionStore`: durable session state with all-or-nothing decode
//! - `TokenVault`: keychain-backed storage for the token itself
//!
//! Tokens are committed with a fixed validity window and refreshed once
//! that window lapses; any ambiguity in restored state degrades to
//! logged-out.

pub mod coordinator;
pub mod error;
pub mod manager;
pub mod store;
pub mod vault;

pub use coordinator::{AuthCoordinator, REGISTER_FAILED_STATUS};
pub use error::AuthError;
pub use manager::{SessionManager, SessionSnapshot, SessionState};
pub use store::{PersistedSession, SessionRecord, SessionStore};
pub use vault::{KeychainVault, MemoryVault, TokenVault};
