use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::core::{CommentId, PostId};
use crate::error::{AppError, AppResult};
use crate::models::{Comment, CommentPatch, NewComment, Post};
use crate::repo::Repository;
use crate::store::{EntityStore, Latency, OpClass};

/// Comment lifecycle is coupled to the owning post: creation requires the
/// post to exist and adjusts its `comments_count` in the same operation, so
/// the counter always equals the number of live comments.
#[derive(Clone)]
pub struct CommentRepository {
    store: Arc<EntityStore<Comment>>,
    posts: Arc<EntityStore<Post>>,
    latency: Latency,
}

impl CommentRepository {
    pub fn new(
        store: Arc<EntityStore<Comment>>,
        posts: Arc<EntityStore<Post>>,
        latency: Latency,
    ) -> Self {
        Self {
            store,
            posts,
            latency,
        }
    }

    /// Comments on one post, oldest first.
    pub async fn by_post(&self, post_id: PostId) -> AppResult<Vec<Comment>> {
        self.latency.simulate(OpClass::Query).await;
        let mut comments = self.store.select(|c| c.post_id == post_id);
        comments.sort_by_key(|c| (c.timestamp, c.id));
        Ok(comments)
    }
}

#[async_trait]
impl Repository for CommentRepository {
    type Id = CommentId;
    type Entity = Comment;
    type Create = NewComment;
    type Patch = CommentPatch;

    async fn list(&self) -> AppResult<Vec<Comment>> {
        self.latency.simulate(OpClass::Query).await;
        Ok(self.store.all())
    }

    async fn get_by_id(&self, id: CommentId) -> AppResult<Comment> {
        self.latency.simulate(OpClass::Read).await;
        self.store
            .get(id.value())
            .ok_or_else(|| AppError::NotFound("Comment not found".to_string()))
    }

    async fn create(&self, payload: NewComment) -> AppResult<Comment> {
        payload.validate()?;
        self.latency.simulate(OpClass::Write).await;
        if !self.posts.contains(payload.post_id.value()) {
            return Err(AppError::NotFound("Post not found".to_string()));
        }
        let comment = self.store.insert(payload.into_record(Utc::now()));
        self.posts
            .update_with(comment.post_id.value(), |p| p.comments_count += 1)?;
        info!(
            "create: Comment {} on post {} by user {}",
            comment.id, comment.post_id, comment.user_id
        );
        Ok(comment)
    }

    async fn update(&self, id: CommentId, patch: CommentPatch) -> AppResult<Comment> {
        self.latency.simulate(OpClass::Write).await;
        let comment = self.store.update_with(id.value(), |c| patch.apply(c))?;
        info!("update: Comment {} updated", comment.id);
        Ok(comment)
    }

    async fn delete(&self, id: CommentId) -> AppResult<Comment> {
        self.latency.simulate(OpClass::Write).await;
        let comment = self.store.remove(id.value())?;
        // The owning post may already be gone.
        let _ = self.posts.update_with(comment.post_id.value(), |p| {
            p.comments_count = p.comments_count.saturating_sub(1)
        });
        info!("delete: Comment {} removed", comment.id);
        Ok(comment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::UserId;
    use chrono::TimeZone;

    fn seed_post(id: i64, comments_count: u32) -> Post {
        Post {
            id: PostId::new(id),
            user_id: UserId::new(1),
            content: "post".to_string(),
            image_urls: vec![],
            timestamp: Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap(),
            likes_count: 0,
            comments_count,
            is_liked: false,
        }
    }

    fn repo_with(posts: Vec<Post>, comments: Vec<Comment>) -> CommentRepository {
        let comment_store = Arc::new(EntityStore::new());
        comment_store.seed(comments);
        let post_store = Arc::new(EntityStore::new());
        post_store.seed(posts);
        CommentRepository::new(comment_store, post_store, Latency::disabled())
    }

    fn new_comment(post_id: i64, content: &str) -> NewComment {
        NewComment {
            post_id: PostId::new(post_id),
            user_id: UserId::new(1),
            content: content.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_requires_live_post() {
        let repo = repo_with(vec![], vec![]);
        assert!(matches!(
            repo.create(new_comment(9, "hi")).await,
            Err(AppError::NotFound(msg)) if msg == "Post not found"
        ));
    }

    #[tokio::test]
    async fn test_create_and_delete_keep_post_counter_in_step() {
        let repo = repo_with(vec![seed_post(1, 0)], vec![]);

        let created = repo.create(new_comment(1, "first!")).await.unwrap();
        assert_eq!(repo.posts.get(1).unwrap().comments_count, 1);

        repo.delete(created.id).await.unwrap();
        assert_eq!(repo.posts.get(1).unwrap().comments_count, 0);
    }

    #[tokio::test]
    async fn test_blank_comment_rejected_before_store() {
        let repo = repo_with(vec![seed_post(1, 0)], vec![]);
        assert!(matches!(
            repo.create(new_comment(1, "  ")).await,
            Err(AppError::Validation(_))
        ));
        assert!(repo.store.is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_content_only() {
        let repo = repo_with(vec![seed_post(1, 0)], vec![]);
        let created = repo.create(new_comment(1, "tpyo")).await.unwrap();

        let patch: CommentPatch = serde_json::from_str(r#"{"id": 55, "content": "typo"}"#).unwrap();
        let updated = repo.update(created.id, patch).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.content, "typo");
        assert_eq!(updated.post_id, created.post_id);
    }

    #[tokio::test]
    async fn test_by_post_is_oldest_first() {
        let base = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let mk = |id: i64, minutes: i64| Comment {
            id: CommentId::new(id),
            post_id: PostId::new(1),
            user_id: UserId::new(1),
            content: format!("c{}", id),
            timestamp: base + chrono::Duration::minutes(minutes),
            likes_count: 0,
        };
        let repo = repo_with(vec![seed_post(1, 3)], vec![mk(1, 30), mk(2, 5), mk(3, 12)]);
        let comments = repo.by_post(PostId::new(1)).await.unwrap();
        let ids: Vec<i64> = comments.iter().map(|c| c.id.value()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }
}
