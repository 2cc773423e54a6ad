use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A content item from the trending/search feeds.
///
/// The feed endpoints return more fields than this; only what the client
/// actually renders is modeled here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    #[serde(rename = "authorId")]
    pub author_id: i64,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}
