//! REST API client module for the voyager backend.
//!
//! This module provides the `AuthApi` boundary trait consumed by the
//! session layer, its production `ApiClient` implementation, and the
//! error type shared by both.
//!
//! The API uses bearer token authentication; the token is installed via
//! `AuthApi::set_global_token` after login or session restore.

pub mod boundary;
pub mod client;
pub mod error;

pub use boundary::{AuthApi, LoginResponse, RefreshResponse, RegisterResponse};
pub use client::ApiClient;
pub use error::ApiError;
