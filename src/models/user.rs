// User entity - profile record plus denormalized follower/following counters

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::core::UserId;
use crate::error::{AppError, AppResult};
use crate::store::entity_store::Record;

static USERNAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new("^[a-zA-Z0-9_]+$").expect("username pattern is valid"));

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub followers_count: u32,
    #[serde(default)]
    pub following_count: u32,
    pub joined_date: DateTime<Utc>,
}

impl Record for User {
    fn id(&self) -> i64 {
        self.id.value()
    }

    fn set_id(&mut self, id: i64) {
        self.id = UserId::new(id);
    }

    fn label() -> &'static str {
        "User"
    }
}

/// Create payload. Counters and the join date are assigned by the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub display_name: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

impl NewUser {
    pub fn validate(&self) -> AppResult<()> {
        if self.username.len() < 3 || self.username.len() > 30 {
            return Err(AppError::Validation(
                "Username must be between 3 and 30 characters".to_string(),
            ));
        }
        if !USERNAME_PATTERN.is_match(&self.username) {
            return Err(AppError::Validation(
                "Username may only contain letters, digits and underscores".to_string(),
            ));
        }
        if self.display_name.trim().is_empty() {
            return Err(AppError::Validation(
                "Display name cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_record(self, joined_date: DateTime<Utc>) -> User {
        User {
            id: UserId::new(0),
            username: self.username,
            display_name: self.display_name,
            bio: self.bio,
            avatar_url: self.avatar_url,
            followers_count: 0,
            following_count: 0,
            joined_date,
        }
    }
}

/// Partial update payload. Carries no id field: an `id` key in an incoming
/// body is ignored during deserialization and the stored id is unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub username: Option<String>,
    pub display_name: Option<String>,
    pub bio: Option<String>,
    pub avatar_url: Option<String>,
}

impl UserPatch {
    pub fn apply(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(display_name) = self.display_name {
            user.display_name = display_name;
        }
        if let Some(bio) = self.bio {
            user.bio = Some(bio);
        }
        if let Some(avatar_url) = self.avatar_url {
            user.avatar_url = Some(avatar_url);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            display_name: "Somebody".to_string(),
            bio: None,
            avatar_url: None,
        }
    }

    #[test]
    fn test_username_validation() {
        assert!(new_user("valid_name99").validate().is_ok());
        assert!(new_user("ab").validate().is_err());
        assert!(new_user("has spaces").validate().is_err());
        assert!(new_user(&"x".repeat(31)).validate().is_err());
    }

    #[test]
    fn test_patch_has_no_id_field() {
        let patch: UserPatch =
            serde_json::from_str(r#"{"id": 999, "displayName": "Renamed"}"#).unwrap();
        let mut user = new_user("someone").into_record(Utc::now());
        user.set_id(4);
        patch.apply(&mut user);
        assert_eq!(user.id, UserId::new(4));
        assert_eq!(user.display_name, "Renamed");
    }
}
