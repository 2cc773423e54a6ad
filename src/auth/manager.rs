//! Process-wide session authority.
//!
//! `SessionManager` is the single source of truth for "is the user logged
//! in". It owns the live session (token, expiration, cached user), the
//! durable [`SessionStore`], and an [`AuthCoordinator`] for remote calls.
//!
//! All mutating methods take `&mut self`: session mutations are serialized
//! by ownership, so at most one refresh is ever in flight and a stale
//! refresh result can never interleave with an explicit logout. Construct
//! one manager at startup and hand it to the presentation layer; readers
//! that only need change notifications use [`SessionManager::subscribe`].

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::AuthApi;
use crate::models::{Capability, User};

use super::coordinator::AuthCoordinator;
use super::store::{SessionRecord, SessionStore};
use super::vault::TokenVault;
use super::AuthError;

/// Validity window granted to a freshly committed token.
/// The server invalidates tokens on its own schedule; this is the client's
/// outer bound after which a refresh is forced.
const TOKEN_TTL_DAYS: i64 = 30;

/// Where the session currently stands. `Unknown` only before the first
/// `initialize` (or explicit commit/clear) has run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unknown,
    Loading,
    LoggedOut,
    LoggedIn,
}

/// Snapshot published to subscribers on every committed state change.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub user: Option<User>,
}

pub struct SessionManager<A: AuthApi, V: TokenVault> {
    coordinator: AuthCoordinator<A>,
    store: SessionStore<V>,
    /// Empty string means "no session".
    token: String,
    token_expiration: DateTime<Utc>,
    current_user: Option<User>,
    loading: bool,
    initialized: bool,
    changes: watch::Sender<SessionSnapshot>,
}

impl<A: AuthApi, V: TokenVault> SessionManager<A, V> {
    pub fn new(api: A, store: SessionStore<V>) -> Self {
        let (changes, _) = watch::channel(SessionSnapshot {
            state: SessionState::Unknown,
            user: None,
        });
        Self {
            coordinator: AuthCoordinator::new(api),
            store,
            token: String::new(),
            token_expiration: Utc::now(),
            current_user: None,
            loading: false,
            initialized: false,
            changes,
        }
    }

    // ===== Read side =====

    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// True while `initialize` is running; session fields are not
    /// authoritative until this turns false.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn state(&self) -> SessionState {
        if self.loading {
            SessionState::Loading
        } else if !self.initialized {
            SessionState::Unknown
        } else if self.current_user.is_some() {
            SessionState::LoggedIn
        } else {
            SessionState::LoggedOut
        }
    }

    /// Subscribe to session changes. The receiver always holds the latest
    /// snapshot; poll or await changes as the presentation layer prefers.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.changes.subscribe()
    }

    pub fn is_current_user(&self, id: i64) -> bool {
        self.current_user.as_ref().is_some_and(|u| u.id == id)
    }

    /// Fixed permission policy over the active user.
    /// Always false when nobody is logged in.
    pub fn has_permission(&self, capability: Capability) -> bool {
        let Some(user) = &self.current_user else {
            return false;
        };
        match capability {
            Capability::EditOwnProfile | Capability::CreateContent => true,
            Capability::DeleteContent { owner_id } => user.id == owner_id,
            Capability::ModerateComments => false,
        }
    }

    /// The coordinator, for intents the manager does not wrap
    /// (chiefly the remote logout notification).
    pub fn coordinator(&self) -> &AuthCoordinator<A> {
        &self.coordinator
    }

    pub fn coordinator_mut(&mut self) -> &mut AuthCoordinator<A> {
        &mut self.coordinator
    }

    // ===== Lifecycle =====

    /// Restore the persisted session at process start.
    ///
    /// Runs once. Restores durable state, refreshes the token if the stored
    /// one has expired, and commits the session only if a user record
    /// survived. Never errors: any ambiguity degrades to logged-out.
    pub async fn initialize(&mut self) {
        self.loading = true;
        self.publish();

        if let Some(persisted) = self.store.load() {
            self.token = persisted.token.clone();
            self.token_expiration = persisted.record.token_expiration;
            self.current_user = Some(persisted.record.current_user.clone());
            self.coordinator
                .adopt(persisted.token, persisted.record.current_user);

            if self.token_expired() {
                debug!("Stored token expired, attempting refresh");
                if let Err(e) = self.refresh_token().await {
                    // refresh_token already cleared everything
                    info!(error = %e, "Could not refresh stored session, starting logged out");
                }
            }
        }

        if self.current_user.is_none() || self.token.is_empty() {
            self.clear_session();
        }

        self.loading = false;
        self.initialized = true;
        self.publish();
    }

    /// Log in and commit the resulting session.
    ///
    /// On any failure the session is left exactly as it was (a failed login
    /// cannot log an already-authenticated user out).
    pub async fn login(&mut self, email: &str, password: &str) -> Result<User> {
        let (token, user) = self.coordinator.login(email, password).await?;
        self.current_user = Some(user.clone());
        self.set_token(token)?;
        Ok(user)
    }

    /// Register a new account; see [`AuthCoordinator::register`] for the
    /// sentinel-code contract.
    pub async fn register(&self, email: &str, password: &str, username: &str) -> i64 {
        self.coordinator.register(email, password, username).await
    }

    /// Current token if held and unexpired; otherwise exactly one refresh
    /// attempt. `AuthError::NoToken` when no token is held at all.
    pub async fn get_valid_token(&mut self) -> Result<String> {
        if self.token.is_empty() {
            return Err(AuthError::NoToken.into());
        }
        if !self.token_expired() {
            return Ok(self.token.clone());
        }
        self.refresh_token().await?;
        Ok(self.token.clone())
    }

    /// Replace the active token, renewing its expiration window and
    /// persisting it alongside the owning user's email hint.
    pub fn set_token(&mut self, token: String) -> Result<()> {
        self.token = token;
        self.token_expiration = Utc::now() + Duration::days(TOKEN_TTL_DAYS);
        self.initialized = true;

        // The durable record needs the user half; until it arrives the
        // session is memory-only and a restart starts logged out.
        if let Some(user) = &self.current_user {
            self.store.save(
                &self.token,
                &SessionRecord {
                    token_expiration: self.token_expiration,
                    user_email: user.email.clone(),
                    current_user: user.clone(),
                },
            )?;
        } else {
            debug!("No active user yet, deferring session persistence");
        }
        self.publish();
        Ok(())
    }

    /// Replace the active user record. No network call.
    ///
    /// `None` drops the user and the persisted state with it (a persisted
    /// record without a user would violate the all-or-nothing layout).
    pub fn set_current_user(&mut self, user: Option<User>) -> Result<()> {
        self.initialized = true;
        match user {
            Some(user) => {
                if !self.token.is_empty() {
                    // Re-persist so the cached profile stays current
                    self.store.save(
                        &self.token,
                        &SessionRecord {
                            token_expiration: self.token_expiration,
                            user_email: user.email.clone(),
                            current_user: user.clone(),
                        },
                    )?;
                }
                self.current_user = Some(user);
            }
            None => {
                self.current_user = None;
                self.store.clear()?;
            }
        }
        self.publish();
        Ok(())
    }

    /// Exchange the held token for a fresh one.
    ///
    /// Failure clears all session state (local and durable) and propagates,
    /// so the presentation layer can route to the login flow.
    pub async fn refresh_token(&mut self) -> Result<()> {
        if self.token.is_empty() {
            return Err(AuthError::NoToken.into());
        }

        let current = self.token.clone();
        match self.coordinator.refresh(&current).await {
            Ok((token, user)) => {
                self.current_user = Some(user);
                self.set_token(token)?;
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "Token refresh failed, clearing session");
                self.clear_session();
                self.publish();
                Err(e)
            }
        }
    }

    /// Clear all session state, in memory and on disk. Idempotent.
    ///
    /// Does not notify the remote side; callers that want that use
    /// [`AuthCoordinator::logout`] via [`SessionManager::coordinator_mut`].
    pub fn logout(&mut self) {
        self.clear_session();
        self.initialized = true;
        self.publish();
    }

    // ===== Internals =====

    fn token_expired(&self) -> bool {
        Utc::now() >= self.token_expiration
    }

    fn clear_session(&mut self) {
        self.token.clear();
        self.token_expiration = Utc::now();
        self.current_user = None;
        self.coordinator.forget();
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear persisted session state");
        }
    }

    fn publish(&self) {
        self.changes.send_replace(SessionSnapshot {
            state: self.state(),
            user: self.current_user.clone(),
        });
    }
}
