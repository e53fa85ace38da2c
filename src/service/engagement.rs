// Engagement Service - like toggling and comment counters.
//
// A post's like state is one viewer-relative flag, not a per-viewer ledger:
// toggling flips `is_liked` and moves `likes_count` by one in the same
// direction. Comment likes have no flag to flip and only count up.

use std::sync::Arc;

use tracing::info;

use crate::core::{CommentId, PostId, UserId};
use crate::error::AppResult;
use crate::models::{Comment, Post};
use crate::store::{EntityStore, Latency, OpClass};

#[derive(Clone)]
pub struct EngagementService {
    posts: Arc<EntityStore<Post>>,
    comments: Arc<EntityStore<Comment>>,
    latency: Latency,
}

impl EngagementService {
    pub fn new(
        posts: Arc<EntityStore<Post>>,
        comments: Arc<EntityStore<Comment>>,
        latency: Latency,
    ) -> Self {
        Self {
            posts,
            comments,
            latency,
        }
    }

    /// Flip the post's like flag and adjust `likes_count` by one in the same
    /// direction. Two consecutive toggles restore the original state.
    pub async fn toggle_like(&self, post_id: PostId, viewer_id: UserId) -> AppResult<Post> {
        self.latency.simulate(OpClass::Write).await;
        let post = self.posts.update_with(post_id.value(), |p| {
            p.is_liked = !p.is_liked;
            if p.is_liked {
                p.likes_count += 1;
            } else {
                p.likes_count = p.likes_count.saturating_sub(1);
            }
        })?;
        info!(
            "toggle_like: Post {} is_liked={} by viewer {}",
            post.id, post.is_liked, viewer_id
        );
        Ok(post)
    }

    /// Comment likes only count up; there is no unlike path.
    pub async fn like_comment(&self, comment_id: CommentId) -> AppResult<Comment> {
        self.latency.simulate(OpClass::Write).await;
        let comment = self
            .comments
            .update_with(comment_id.value(), |c| c.likes_count += 1)?;
        info!("like_comment: Comment {} liked", comment.id);
        Ok(comment)
    }

    /// Bump a post's comment counter by exactly one.
    pub async fn increment_comment_count(&self, post_id: PostId) -> AppResult<Post> {
        self.latency.simulate(OpClass::Write).await;
        let post = self
            .posts
            .update_with(post_id.value(), |p| p.comments_count += 1)?;
        info!(
            "increment_comment_count: Post {} now {}",
            post.id, post.comments_count
        );
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use chrono::Utc;

    fn seed_post(id: i64, likes: u32, is_liked: bool) -> Post {
        Post {
            id: PostId::new(id),
            user_id: UserId::new(1),
            content: "post".to_string(),
            image_urls: vec![],
            timestamp: Utc::now(),
            likes_count: likes,
            comments_count: 0,
            is_liked,
        }
    }

    fn service(posts: Vec<Post>, comments: Vec<Comment>) -> EngagementService {
        let post_store = Arc::new(EntityStore::new());
        post_store.seed(posts);
        let comment_store = Arc::new(EntityStore::new());
        comment_store.seed(comments);
        EngagementService::new(post_store, comment_store, Latency::disabled())
    }

    #[tokio::test]
    async fn test_double_toggle_restores_original_state() {
        let svc = service(vec![seed_post(1, 12, false)], vec![]);
        let viewer = UserId::new(1);

        let once = svc.toggle_like(PostId::new(1), viewer).await.unwrap();
        assert!(once.is_liked);
        assert_eq!(once.likes_count, 13);

        let twice = svc.toggle_like(PostId::new(1), viewer).await.unwrap();
        assert!(!twice.is_liked);
        assert_eq!(twice.likes_count, 12);
    }

    #[tokio::test]
    async fn test_toggle_like_missing_post() {
        let svc = service(vec![], vec![]);
        assert!(matches!(
            svc.toggle_like(PostId::new(5), UserId::new(1)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_comment_likes_only_count_up() {
        let comment = Comment {
            id: CommentId::new(1),
            post_id: PostId::new(1),
            user_id: UserId::new(1),
            content: "nice".to_string(),
            timestamp: Utc::now(),
            likes_count: 0,
        };
        let svc = service(vec![], vec![comment]);

        svc.like_comment(CommentId::new(1)).await.unwrap();
        let again = svc.like_comment(CommentId::new(1)).await.unwrap();
        assert_eq!(again.likes_count, 2);
    }

    #[tokio::test]
    async fn test_increment_comment_count() {
        let svc = service(vec![seed_post(1, 0, false)], vec![]);
        let post = svc.increment_comment_count(PostId::new(1)).await.unwrap();
        assert_eq!(post.comments_count, 1);

        assert!(matches!(
            svc.increment_comment_count(PostId::new(9)).await,
            Err(AppError::NotFound(msg)) if msg == "Post not found"
        ));
    }
}
