//! HTTP client for the voyager REST API.
//!
//! This module provides the `ApiClient` struct implementing the `AuthApi`
//! boundary (login, logout, refresh, user info, registration) plus the
//! unauthenticated discovery endpoints (trending, user search).

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use crate::models::{Post, User};

use super::boundary::{AuthApi, LoginResponse, RefreshResponse, RegisterResponse};
use super::ApiError;

/// Base URL for the voyager API
const API_BASE_URL: &str = "https://api.voyager.app";

/// HTTP request timeout in seconds.
/// 30s allows for slow mobile networks while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// API client for the voyager backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against the production base URL
    pub fn new() -> Result<Self> {
        Self::with_base_url(API_BASE_URL)
    }

    /// Create a client against an alternate base URL (staging, tests)
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Create a client from the app config, honoring a base URL override
    pub fn from_config(config: &crate::config::Config) -> Result<Self> {
        match &config.api_base_url {
            Some(url) => Self::with_base_url(url.clone()),
            None => Self::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> Result<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(ref token) = self.token {
            headers.insert(
                header::AUTHORIZATION,
                header::HeaderValue::from_str(&format!("Bearer {}", token))?,
            );
        }
        Ok(headers)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> Result<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body).into())
        }
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .with_context(|| format!("Failed to send GET request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    async fn post<T: DeserializeOwned, B: Serialize>(&self, path: &str, body: &B) -> Result<T> {
        let url = self.url(path);
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .json(body)
            .send()
            .await
            .with_context(|| format!("Failed to send POST request to {}", url))?;

        let response = Self::check_response(response).await?;
        response
            .json()
            .await
            .with_context(|| format!("Failed to parse JSON response from {}", url))
    }

    // ===== Discovery endpoints =====

    /// Search accounts by username or email fragment
    pub async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        let url = self.url("/v1/users/search");
        let response = self
            .client
            .get(&url)
            .query(&[("q", query)])
            .headers(self.auth_headers()?)
            .send()
            .await
            .context("Failed to send user search request")?;

        let response = Self::check_response(response).await?;
        let text = response.text().await?;
        debug!("User search response received");

        // Try parsing as direct array first, then as wrapped object
        if let Ok(users) = serde_json::from_str::<Vec<User>>(&text) {
            return Ok(users);
        }

        #[derive(Deserialize)]
        struct UsersWrapper {
            #[serde(default)]
            users: Vec<User>,
        }

        let wrapper: UsersWrapper =
            serde_json::from_str(&text).context("Failed to parse user search response")?;
        Ok(wrapper.users)
    }

    /// Fetch the trending feed
    pub async fn fetch_trending(&self) -> Result<Vec<Post>> {
        let url = self.url("/v1/posts/trending");
        let response = self
            .client
            .get(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .context("Failed to send trending request")?;

        let response = Self::check_response(response).await?;
        let text = response.text().await?;
        debug!("Trending response received");

        if let Ok(posts) = serde_json::from_str::<Vec<Post>>(&text) {
            return Ok(posts);
        }

        #[derive(Deserialize)]
        struct PostsWrapper {
            #[serde(default)]
            posts: Vec<Post>,
        }

        let wrapper: PostsWrapper =
            serde_json::from_str(&text).context("Failed to parse trending response")?;
        Ok(wrapper.posts)
    }
}

impl AuthApi for ApiClient {
    fn set_global_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    async fn login(&self, email: &str, password: &str) -> Result<LoginResponse> {
        let body = serde_json::json!({ "email": email, "password": password });
        self.post("/v1/auth/login", &body)
            .await
            .context("Login request failed")
    }

    async fn logout(&self) -> Result<()> {
        let url = self.url("/v1/auth/logout");
        let response = self
            .client
            .post(&url)
            .headers(self.auth_headers()?)
            .send()
            .await
            .context("Failed to send logout request")?;

        Self::check_response(response).await?;
        Ok(())
    }

    async fn refresh_token(&self, current_token: &str) -> Result<RefreshResponse> {
        let body = serde_json::json!({ "token": current_token });
        self.post("/v1/auth/refresh", &body)
            .await
            .context("Token refresh request failed")
    }

    async fn get_user_info(&self, user_id: i64) -> Result<User> {
        self.get(&format!("/v1/users/{}", user_id))
            .await
            .context("User info request failed")
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        username: &str,
    ) -> Result<RegisterResponse> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
            "username": username,
        });
        self.post("/v1/auth/register", &body)
            .await
            .context("Registration request failed")
    }
}
