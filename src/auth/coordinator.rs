//! Translation of auth intents (login, refresh, register, logout) into
//! remote API calls.
//!
//! The coordinator caches the last-known token/user as a convenience but is
//! never the durability authority - the session manager owns persistence.
//! Operations that can partially succeed (token issued but profile fetch
//! fails) discard the partial result rather than leaving a mixed cache.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::api::AuthApi;
use crate::models::User;

use super::AuthError;

/// Status code reported by `register` when the call failed before the server
/// produced one. Distinct from every valid HTTP status.
pub const REGISTER_FAILED_STATUS: i64 = -1;

pub struct AuthCoordinator<A: AuthApi> {
    api: A,
    token: Option<String>,
    user: Option<User>,
}

impl<A: AuthApi> AuthCoordinator<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            token: None,
            user: None,
        }
    }

    /// Last token this coordinator saw, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Exchange credentials for a token and the account's profile.
    ///
    /// A transport-level success carrying an empty token is a login failure
    /// (`AuthError::EmptyCredentialToken`). The cache and the client's global
    /// token are only updated once both the token and the profile are in hand.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(String, User)> {
        let resp = self.api.login(email, password).await?;
        if resp.token.is_empty() {
            return Err(AuthError::EmptyCredentialToken.into());
        }

        let user = self
            .api
            .get_user_info(resp.user_id)
            .await
            .context("Profile fetch after login failed")?;

        debug!(user_id = user.id, "Login succeeded");
        self.commit(resp.token.clone(), user.clone());
        Ok((resp.token, user))
    }

    /// Exchange the current token for a fresh one and re-fetch the profile.
    ///
    /// Either both the token and the user update, or neither does.
    pub async fn refresh(&mut self, current_token: &str) -> Result<(String, User)> {
        let resp = self
            .api
            .refresh_token(current_token)
            .await
            .map_err(|e| AuthError::RefreshFailed(format!("{:#}", e)))?;
        if resp.token.is_empty() {
            return Err(AuthError::RefreshFailed("refresh returned an empty token".into()).into());
        }

        let user = self
            .api
            .get_user_info(resp.user_id)
            .await
            .map_err(|e| AuthError::RefreshFailed(format!("profile re-fetch failed: {:#}", e)))?;

        debug!(user_id = user.id, "Token refreshed");
        self.commit(resp.token.clone(), user.clone());
        Ok((resp.token, user))
    }

    /// Register a new account, returning the server's status code.
    ///
    /// Callers only branch on success/failure, so transport and decode
    /// errors collapse into [`REGISTER_FAILED_STATUS`].
    pub async fn register(&self, email: &str, password: &str, username: &str) -> i64 {
        match self.api.register(email, password, username).await {
            Ok(resp) => resp.status_code,
            Err(e) => {
                warn!(error = %e, "Registration request failed");
                REGISTER_FAILED_STATUS
            }
        }
    }

    /// Notify the remote side of logout, best-effort, then drop local state.
    ///
    /// Remote failures are logged and swallowed: logout must always succeed
    /// locally regardless of the remote outcome.
    pub async fn logout(&mut self) {
        if let Err(e) = self.api.logout().await {
            warn!(error = %e, "Remote logout failed, clearing local state anyway");
        }
        self.forget();
    }

    /// Adopt an externally restored session (no network call).
    pub fn adopt(&mut self, token: String, user: User) {
        self.commit(token, user);
    }

    /// Drop the cached token/user and the client's global token.
    pub fn forget(&mut self) {
        self.token = None;
        self.user = None;
        self.api.set_global_token(None);
    }

    fn commit(&mut self, token: String, user: User) {
        self.api.set_global_token(Some(token.clone()));
        self.token = Some(token);
        self.user = Some(user);
    }
}
