use std::cmp::Reverse;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::core::{PostId, UserId};
use crate::error::{AppError, AppResult};
use crate::models::{NewPost, Post, PostPatch};
use crate::repo::Repository;
use crate::store::{EntityStore, Latency, OpClass};

#[derive(Clone)]
pub struct PostRepository {
    store: Arc<EntityStore<Post>>,
    latency: Latency,
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by_key(|p| Reverse((p.timestamp, p.id)));
    posts
}

impl PostRepository {
    pub fn new(store: Arc<EntityStore<Post>>, latency: Latency) -> Self {
        Self { store, latency }
    }

    /// Posts authored by one user, newest first.
    pub async fn by_user(&self, user_id: UserId) -> AppResult<Vec<Post>> {
        self.latency.simulate(OpClass::Query).await;
        Ok(newest_first(self.store.select(|p| p.user_id == user_id)))
    }

    /// The viewer's feed: posts authored by followed users, newest first.
    /// An empty following list falls back to the full timeline.
    pub async fn feed(&self, following_ids: &[UserId]) -> AppResult<Vec<Post>> {
        self.latency.simulate(OpClass::Query).await;
        let posts = if following_ids.is_empty() {
            self.store.all()
        } else {
            self.store.select(|p| following_ids.contains(&p.user_id))
        };
        Ok(newest_first(posts))
    }
}

#[async_trait]
impl Repository for PostRepository {
    type Id = PostId;
    type Entity = Post;
    type Create = NewPost;
    type Patch = PostPatch;

    async fn list(&self) -> AppResult<Vec<Post>> {
        self.latency.simulate(OpClass::Query).await;
        Ok(newest_first(self.store.all()))
    }

    async fn get_by_id(&self, id: PostId) -> AppResult<Post> {
        self.latency.simulate(OpClass::Read).await;
        self.store
            .get(id.value())
            .ok_or_else(|| AppError::NotFound("Post not found".to_string()))
    }

    async fn create(&self, payload: NewPost) -> AppResult<Post> {
        payload.validate()?;
        self.latency.simulate(OpClass::Write).await;
        let post = self.store.insert(payload.into_record(Utc::now()));
        info!("create: Post {} by user {}", post.id, post.user_id);
        Ok(post)
    }

    async fn update(&self, id: PostId, patch: PostPatch) -> AppResult<Post> {
        self.latency.simulate(OpClass::Write).await;
        let post = self.store.update_with(id.value(), |p| patch.apply(p))?;
        info!("update: Post {} updated", post.id);
        Ok(post)
    }

    async fn delete(&self, id: PostId) -> AppResult<Post> {
        self.latency.simulate(OpClass::Write).await;
        let post = self.store.remove(id.value())?;
        info!("delete: Post {} removed", post.id);
        Ok(post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn seed_post(id: i64, user_id: i64, day: u32) -> Post {
        Post {
            id: PostId::new(id),
            user_id: UserId::new(user_id),
            content: format!("post {}", id),
            image_urls: vec![],
            timestamp: Utc.with_ymd_and_hms(2025, 6, day, 12, 0, 0).unwrap(),
            likes_count: 0,
            comments_count: 0,
            is_liked: false,
        }
    }

    fn repo_with(posts: Vec<Post>) -> PostRepository {
        let store = Arc::new(EntityStore::new());
        store.seed(posts);
        PostRepository::new(store, Latency::disabled())
    }

    #[tokio::test]
    async fn test_list_is_newest_first() {
        let repo = repo_with(vec![
            seed_post(1, 1, 3),
            seed_post(2, 2, 9),
            seed_post(3, 1, 6),
        ]);
        let posts = repo.list().await.unwrap();
        let ids: Vec<i64> = posts.iter().map(|p| p.id.value()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[tokio::test]
    async fn test_created_post_leads_author_query() {
        let repo = repo_with(vec![seed_post(1, 1, 3), seed_post(2, 1, 9)]);
        let created = repo
            .create(NewPost {
                user_id: UserId::new(1),
                content: "hello".to_string(),
                image_urls: vec![],
            })
            .await
            .unwrap();
        assert_eq!(created.likes_count, 0);
        assert_eq!(created.comments_count, 0);
        assert!(!created.is_liked);

        let mine = repo.by_user(UserId::new(1)).await.unwrap();
        assert_eq!(mine[0].id, created.id);
    }

    #[tokio::test]
    async fn test_feed_filters_by_following_and_falls_back() {
        let repo = repo_with(vec![
            seed_post(1, 1, 3),
            seed_post(2, 2, 9),
            seed_post(3, 3, 6),
        ]);

        let feed = repo.feed(&[UserId::new(2)]).await.unwrap();
        assert_eq!(feed.len(), 1);
        assert_eq!(feed[0].user_id, UserId::new(2));

        let everything = repo.feed(&[]).await.unwrap();
        assert_eq!(everything.len(), 3);
    }

    #[tokio::test]
    async fn test_update_ignores_id_in_payload() {
        let repo = repo_with(vec![seed_post(1, 1, 3)]);
        let patch: PostPatch =
            serde_json::from_str(r#"{"id": 777, "content": "edited"}"#).unwrap();
        let updated = repo.update(PostId::new(1), patch).await.unwrap();
        assert_eq!(updated.id, PostId::new(1));
        assert_eq!(updated.content, "edited");
    }

    #[tokio::test]
    async fn test_delete_returns_removed_copy() {
        let repo = repo_with(vec![seed_post(1, 1, 3)]);
        let removed = repo.delete(PostId::new(1)).await.unwrap();
        assert_eq!(removed.id, PostId::new(1));
        assert!(matches!(
            repo.get_by_id(PostId::new(1)).await,
            Err(AppError::NotFound(_))
        ));
    }
}
