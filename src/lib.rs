//! Core library for the voyager client - API client, session management,
//! data models, and configuration.
//!
//! The presentation layer constructs one [`SessionManager`] at startup and
//! passes it down (dependency injection, no global singleton), calls
//! [`SessionManager::initialize`] once before treating session state as
//! authoritative, and renders from the snapshots published through
//! [`SessionManager::subscribe`].

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

#[cfg(test)]
pub(crate) mod testutil;

pub use api::{ApiClient, ApiError, AuthApi};
pub use auth::{
    AuthCoordinator, AuthError, KeychainVault, SessionManager, SessionSnapshot, SessionState,
    SessionStore, TokenVault,
};
pub use config::Config;
pub use models::{Capability, Post, User};
