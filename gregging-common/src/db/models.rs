//! Database models
//!
//! Row types serialize with camelCase field names, the shape the frontend
//! consumes. Credential columns live only on [`User`], which is not
//! serializable; responses use [`PublicUser`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::{Error, Result};

/// Accepted profile themes
pub const THEMES: &[&str] = &["light", "dark"];

pub const DEFAULT_THEME: &str = "light";

/// Full user row, including credentials
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// User as exposed over HTTP
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub github_username: Option<String>,
    pub linkedin_profile: Option<String>,
    pub portfolio_url: Option<String>,
    pub theme: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default)]
pub struct NewProfile {
    pub user_id: i64,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub github_username: Option<String>,
}

/// Partial profile update
///
/// `None` leaves a field unchanged; an empty string clears an optional field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
    pub github_username: Option<String>,
    pub linkedin_profile: Option<String>,
    pub portfolio_url: Option<String>,
    pub theme: Option<String>,
}

impl ProfileUpdate {
    pub fn validate(&self) -> Result<()> {
        if let Some(theme) = &self.theme {
            if !THEMES.contains(&theme.as_str()) {
                return Err(Error::InvalidInput(format!(
                    "Invalid theme '{}' (expected one of: {})",
                    theme,
                    THEMES.join(", ")
                )));
            }
        }
        Ok(())
    }

    /// Merge this patch into an existing profile
    pub fn apply_to(self, profile: &mut Profile) {
        fn merge(target: &mut Option<String>, patch: Option<String>) {
            if let Some(value) = patch {
                let trimmed = value.trim();
                *target = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                };
            }
        }

        merge(&mut profile.display_name, self.display_name);
        merge(&mut profile.bio, self.bio);
        merge(&mut profile.avatar_url, self.avatar_url);
        merge(&mut profile.github_username, self.github_username);
        merge(&mut profile.linkedin_profile, self.linkedin_profile);
        merge(&mut profile.portfolio_url, self.portfolio_url);
        if let Some(theme) = self.theme {
            profile.theme = theme;
        }
    }
}

/// A quiz attached to a topic slug
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Test {
    pub id: i64,
    pub topic_slug: String,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTest {
    pub topic_slug: String,
    pub title: String,
    pub description: Option<String>,
    pub difficulty: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: i64,
    pub test_id: i64,
    pub question_text: String,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub order_index: i64,
}

#[derive(Debug, Clone)]
pub struct NewQuestion {
    pub test_id: i64,
    pub question_text: String,
    pub correct_answer: String,
    pub explanation: Option<String>,
    pub order_index: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserScore {
    pub id: i64,
    pub user_id: i64,
    pub test_id: i64,
    pub score: i64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUserScore {
    pub user_id: i64,
    pub test_id: i64,
    pub score: i64,
}

/// A user's score joined with the test it belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub id: i64,
    pub test_id: i64,
    pub topic_slug: String,
    pub test_title: String,
    pub score: i64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Discussion {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDiscussion {
    pub user_id: i64,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionWithComments {
    #[serde(flatten)]
    pub discussion: Discussion,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub discussion_id: i64,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub discussion_id: i64,
    pub user_id: i64,
    pub content: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    /// Unix epoch seconds
    pub expires_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_profile() -> Profile {
        Profile {
            id: 1,
            user_id: 1,
            display_name: Some("John Doe".to_string()),
            bio: Some("Software Developer".to_string()),
            avatar_url: None,
            github_username: Some("jdoe".to_string()),
            linkedin_profile: None,
            portfolio_url: None,
            theme: "light".to_string(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_patch_leaves_missing_fields() {
        let mut profile = sample_profile();
        ProfileUpdate {
            bio: Some("Algorithms nerd".to_string()),
            ..Default::default()
        }
        .apply_to(&mut profile);

        assert_eq!(profile.bio.as_deref(), Some("Algorithms nerd"));
        assert_eq!(profile.display_name.as_deref(), Some("John Doe"));
        assert_eq!(profile.github_username.as_deref(), Some("jdoe"));
    }

    #[test]
    fn test_patch_empty_string_clears() {
        let mut profile = sample_profile();
        ProfileUpdate {
            github_username: Some("  ".to_string()),
            ..Default::default()
        }
        .apply_to(&mut profile);

        assert_eq!(profile.github_username, None);
    }

    #[test]
    fn test_theme_validation() {
        let ok = ProfileUpdate {
            theme: Some("dark".to_string()),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());

        let bad = ProfileUpdate {
            theme: Some("neon".to_string()),
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_public_user_hides_credentials() {
        let user = User {
            id: 7,
            username: "jane_doe".to_string(),
            password_hash: "hash".to_string(),
            email: "jane@example.com".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(PublicUser::from(&user)).unwrap();
        assert_eq!(json["username"], "jane_doe");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("password_hash").is_none());
        assert!(json.get("createdAt").is_some());
    }
}
