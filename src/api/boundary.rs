use anyhow::Result;
use serde::Deserialize;

use crate::models::User;

/// Successful login payload: the issued token plus the account it belongs to.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(rename = "userId")]
    pub user_id: i64,
}

/// Successful token refresh payload.
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshResponse {
    #[serde(rename = "userId")]
    pub user_id: i64,
    pub token: String,
}

/// Registration outcome as reported by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterResponse {
    #[serde(rename = "statusCode")]
    pub status_code: i64,
}

/// The remote authentication boundary consumed by the session layer.
///
/// `ApiClient` is the production implementation; tests substitute a scripted
/// mock. Transport and decode errors surface as `anyhow::Error` with an
/// `ApiError` at the root where an HTTP status was involved.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    /// Side-channel: make subsequent calls carry (or stop carrying) the token.
    fn set_global_token(&mut self, token: Option<String>);

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse>;

    async fn logout(&self) -> Result<()>;

    async fn refresh_token(&self, current_token: &str) -> Result<RefreshResponse>;

    async fn get_user_info(&self, user_id: i64) -> Result<User>;

    async fn register(&self, email: &str, password: &str, username: &str)
        -> Result<RegisterResponse>;
}
