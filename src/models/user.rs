use serde::{Deserialize, Serialize};

/// A voyager account as returned by the user-info endpoint and cached in
/// the persisted session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub username: String,
    #[serde(rename = "avatarUrl", default)]
    pub avatar_url: String,
}

impl User {
    /// Name shown in the UI; falls back to the email when the username is empty
    pub fn display_name(&self) -> &str {
        if self.username.is_empty() {
            &self.email
        } else {
            &self.username
        }
    }
}

/// Capability tags evaluated by the session manager's permission policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    EditOwnProfile,
    CreateContent,
    DeleteContent { owner_id: i64 },
    ModerateComments,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut user = User {
            id: 1,
            email: "a@b.com".to_string(),
            username: "ab".to_string(),
            avatar_url: String::new(),
        };
        assert_eq!(user.display_name(), "ab");

        user.username.clear();
        assert_eq!(user.display_name(), "a@b.com");
    }

    #[test]
    fn test_user_parses_camel_case_avatar_url() {
        let json = r#"{"id":42,"email":"a@b.com","username":"ab","avatarUrl":"https://cdn.voyager.app/a.png"}"#;
        let user: User = serde_json::from_str(json).expect("failed to parse user JSON");
        assert_eq!(user.id, 42);
        assert_eq!(user.avatar_url, "https://cdn.voyager.app/a.png");
    }

    #[test]
    fn test_user_tolerates_missing_avatar_url() {
        let json = r#"{"id":7,"email":"c@d.com","username":"cd"}"#;
        let user: User = serde_json::from_str(json).expect("failed to parse user JSON");
        assert!(user.avatar_url.is_empty());
    }
}
