// Post entity - feed item with engagement counters and the viewer-relative
// like flag. `comments_count` tracks live comments referencing the post.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{PostId, UserId};
use crate::error::{AppError, AppResult};
use crate::store::entity_store::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: PostId,
    pub user_id: UserId,
    pub content: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub likes_count: u32,
    #[serde(default)]
    pub comments_count: u32,
    #[serde(default)]
    pub is_liked: bool,
}

impl Record for Post {
    fn id(&self) -> i64 {
        self.id.value()
    }

    fn set_id(&mut self, id: i64) {
        self.id = PostId::new(id);
    }

    fn label() -> &'static str {
        "Post"
    }
}

/// Create payload. Counters, the like flag and the timestamp are assigned by
/// the repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPost {
    pub user_id: UserId,
    pub content: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

impl NewPost {
    pub fn validate(&self) -> AppResult<()> {
        if self.content.trim().is_empty() {
            return Err(AppError::Validation(
                "Post content cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_record(self, timestamp: DateTime<Utc>) -> Post {
        Post {
            id: PostId::new(0),
            user_id: self.user_id,
            content: self.content,
            image_urls: self.image_urls,
            timestamp,
            likes_count: 0,
            comments_count: 0,
            is_liked: false,
        }
    }
}

/// Partial update payload. No id field; the stored id is unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostPatch {
    pub content: Option<String>,
    pub image_urls: Option<Vec<String>>,
}

impl PostPatch {
    pub fn apply(self, post: &mut Post) {
        if let Some(content) = self.content {
            post.content = content;
        }
        if let Some(image_urls) = self.image_urls {
            post.image_urls = image_urls;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_content_rejected() {
        let post = NewPost {
            user_id: UserId::new(1),
            content: "   ".to_string(),
            image_urls: vec![],
        };
        assert!(matches!(post.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_new_record_starts_unengaged() {
        let post = NewPost {
            user_id: UserId::new(1),
            content: "hello".to_string(),
            image_urls: vec![],
        }
        .into_record(Utc::now());
        assert_eq!(post.likes_count, 0);
        assert_eq!(post.comments_count, 0);
        assert!(!post.is_liked);
    }
}
