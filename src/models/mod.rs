//! Data models for voyager entities.
//!
//! This module contains the data structures shared between the API client
//! and the session layer:
//!
//! - `User`: account identity cached with the session
//! - `Capability`: permission tags for the session manager's policy checks
//! - `Post`: trending/search content items

pub mod content;
pub mod user;

pub use content::Post;
pub use user::{Capability, User};
