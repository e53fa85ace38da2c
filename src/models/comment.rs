// Comment entity. Must reference a live post at creation time; carries a
// like counter but no viewer-relative like flag.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{CommentId, PostId, UserId};
use crate::error::{AppError, AppResult};
use crate::store::entity_store::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub likes_count: u32,
}

impl Record for Comment {
    fn id(&self) -> i64 {
        self.id.value()
    }

    fn set_id(&mut self, id: i64) {
        self.id = CommentId::new(id);
    }

    fn label() -> &'static str {
        "Comment"
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewComment {
    pub post_id: PostId,
    pub user_id: UserId,
    pub content: String,
}

impl NewComment {
    pub fn validate(&self) -> AppResult<()> {
        if self.content.trim().is_empty() {
            return Err(AppError::Validation(
                "Comment content cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn into_record(self, timestamp: DateTime<Utc>) -> Comment {
        Comment {
            id: CommentId::new(0),
            post_id: self.post_id,
            user_id: self.user_id,
            content: self.content,
            timestamp,
            likes_count: 0,
        }
    }
}

/// Partial update payload. No id field; the stored id is unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPatch {
    pub content: Option<String>,
}

impl CommentPatch {
    pub fn apply(self, comment: &mut Comment) {
        if let Some(content) = self.content {
            comment.content = content;
        }
    }
}
