//! Shared test helpers, available to all `#[cfg(test)]` modules in the crate.

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};

use crate::api::{AuthApi, LoginResponse, RefreshResponse, RegisterResponse};
use crate::models::User;

/// Build a plausible account for tests.
pub fn test_user(id: i64) -> User {
    User {
        id,
        email: format!("user{}@voyager.app", id),
        username: format!("user{}", id),
        avatar_url: String::new(),
    }
}

/// Observed calls plus the token last installed via `set_global_token`.
#[derive(Debug, Default)]
pub struct MockCalls {
    pub login_calls: usize,
    pub logout_calls: usize,
    pub refresh_calls: usize,
    pub user_info_calls: usize,
    pub register_calls: usize,
    pub global_token: Option<String>,
}

/// Scripted `AuthApi` implementation. Operations left unconfigured fail,
/// standing in for a transport error.
pub struct MockApi {
    calls: Arc<Mutex<MockCalls>>,
    login: Option<(String, i64)>,
    refresh: Option<(String, i64)>,
    user: Option<User>,
    register_status: Option<i64>,
    fail_user_info: bool,
    fail_logout: bool,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(MockCalls::default())),
            login: None,
            refresh: None,
            user: None,
            register_status: Some(200),
            fail_user_info: false,
            fail_logout: false,
        }
    }

    /// Handle on the call log; keep the clone, the mock moves into the
    /// component under test.
    pub fn calls(&self) -> Arc<Mutex<MockCalls>> {
        Arc::clone(&self.calls)
    }

    pub fn with_login(mut self, token: &str, user_id: i64) -> Self {
        self.login = Some((token.to_string(), user_id));
        self
    }

    pub fn with_refresh(mut self, token: &str, user_id: i64) -> Self {
        self.refresh = Some((token.to_string(), user_id));
        self
    }

    pub fn with_user(mut self, user: User) -> Self {
        self.user = Some(user);
        self
    }

    pub fn with_register_status(mut self, status: i64) -> Self {
        self.register_status = Some(status);
        self
    }

    pub fn failing_refresh(mut self) -> Self {
        self.refresh = None;
        self
    }

    pub fn failing_user_info(mut self) -> Self {
        self.fail_user_info = true;
        self
    }

    pub fn failing_logout(mut self) -> Self {
        self.fail_logout = true;
        self
    }

    pub fn failing_register(mut self) -> Self {
        self.register_status = None;
        self
    }
}

impl AuthApi for MockApi {
    fn set_global_token(&mut self, token: Option<String>) {
        self.calls.lock().unwrap().global_token = token;
    }

    async fn login(&self, _email: &str, _password: &str) -> Result<LoginResponse> {
        self.calls.lock().unwrap().login_calls += 1;
        match &self.login {
            Some((token, user_id)) => Ok(LoginResponse {
                token: token.clone(),
                user_id: *user_id,
            }),
            None => Err(anyhow!("mock: login transport error")),
        }
    }

    async fn logout(&self) -> Result<()> {
        self.calls.lock().unwrap().logout_calls += 1;
        if self.fail_logout {
            Err(anyhow!("mock: logout transport error"))
        } else {
            Ok(())
        }
    }

    async fn refresh_token(&self, _current_token: &str) -> Result<RefreshResponse> {
        self.calls.lock().unwrap().refresh_calls += 1;
        match &self.refresh {
            Some((token, user_id)) => Ok(RefreshResponse {
                user_id: *user_id,
                token: token.clone(),
            }),
            None => Err(anyhow!("mock: refresh transport error")),
        }
    }

    async fn get_user_info(&self, _user_id: i64) -> Result<User> {
        self.calls.lock().unwrap().user_info_calls += 1;
        if self.fail_user_info {
            return Err(anyhow!("mock: user info transport error"));
        }
        self.user
            .clone()
            .ok_or_else(|| anyhow!("mock: no user configured"))
    }

    async fn register(
        &self,
        _email: &str,
        _password: &str,
        _username: &str,
    ) -> Result<RegisterResponse> {
        self.calls.lock().unwrap().register_calls += 1;
        match self.register_status {
            Some(status_code) => Ok(RegisterResponse { status_code }),
            None => Err(anyhow!("mock: register transport error")),
        }
    }
}
