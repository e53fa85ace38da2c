// Relationship Service - follow/unfollow edge management. Edge mutation and
// the follower/following counter adjustments happen in one call, keeping the
// invariant: a user's counters always equal the live edge counts.

use std::sync::Arc;

use chrono::Utc;
use tracing::info;

use crate::core::UserId;
use crate::error::{AppError, AppResult};
use crate::models::{FollowEdge, User};
use crate::store::{EntityStore, Latency, OpClass};

#[derive(Clone)]
pub struct RelationshipService {
    follows: Arc<EntityStore<FollowEdge>>,
    users: Arc<EntityStore<User>>,
    latency: Latency,
}

impl RelationshipService {
    pub fn new(
        follows: Arc<EntityStore<FollowEdge>>,
        users: Arc<EntityStore<User>>,
        latency: Latency,
    ) -> Self {
        Self {
            follows,
            users,
            latency,
        }
    }

    /// Create the follow edge and bump both counters. Fails with
    /// `DuplicateRelation` when the edge already exists and `Validation`
    /// on a self-follow.
    pub async fn follow(&self, follower_id: UserId, following_id: UserId) -> AppResult<FollowEdge> {
        self.latency.simulate(OpClass::Write).await;

        if follower_id == following_id {
            return Err(AppError::Validation(
                "Cannot follow yourself".to_string(),
            ));
        }
        if !self.users.contains(follower_id.value()) || !self.users.contains(following_id.value())
        {
            return Err(AppError::NotFound("User not found".to_string()));
        }
        if self
            .follows
            .find(|f| f.follower_id == follower_id && f.following_id == following_id)
            .is_some()
        {
            return Err(AppError::DuplicateRelation(
                "Already following this user".to_string(),
            ));
        }

        let edge = self
            .follows
            .insert(FollowEdge::new(follower_id, following_id, Utc::now()));
        self.users
            .update_with(follower_id.value(), |u| u.following_count += 1)?;
        self.users
            .update_with(following_id.value(), |u| u.followers_count += 1)?;
        info!("follow: {} -> {}", follower_id, following_id);
        Ok(edge)
    }

    /// Remove the follow edge and decrement both counters. Fails with
    /// `NotFound` when no such edge exists.
    pub async fn unfollow(
        &self,
        follower_id: UserId,
        following_id: UserId,
    ) -> AppResult<FollowEdge> {
        self.latency.simulate(OpClass::Write).await;

        let edge = self
            .follows
            .remove_where(|f| f.follower_id == follower_id && f.following_id == following_id)?;
        // Either user may have been deleted since the edge was created.
        let _ = self.users.update_with(follower_id.value(), |u| {
            u.following_count = u.following_count.saturating_sub(1)
        });
        let _ = self.users.update_with(following_id.value(), |u| {
            u.followers_count = u.followers_count.saturating_sub(1)
        });
        info!("unfollow: {} -> {}", follower_id, following_id);
        Ok(edge)
    }

    pub async fn is_following(&self, follower_id: UserId, following_id: UserId) -> AppResult<bool> {
        self.latency.simulate(OpClass::Read).await;
        Ok(self
            .follows
            .find(|f| f.follower_id == follower_id && f.following_id == following_id)
            .is_some())
    }

    /// Ids of every user the given user follows.
    pub async fn following_ids(&self, user_id: UserId) -> AppResult<Vec<UserId>> {
        self.latency.simulate(OpClass::Read).await;
        Ok(self
            .follows
            .select(|f| f.follower_id == user_id)
            .into_iter()
            .map(|f| f.following_id)
            .collect())
    }

    /// Edges pointing at the given user.
    pub async fn followers(&self, user_id: UserId) -> AppResult<Vec<FollowEdge>> {
        self.latency.simulate(OpClass::Query).await;
        Ok(self.follows.select(|f| f.following_id == user_id))
    }

    /// Edges originating from the given user.
    pub async fn following(&self, user_id: UserId) -> AppResult<Vec<FollowEdge>> {
        self.latency.simulate(OpClass::Query).await;
        Ok(self.follows.select(|f| f.follower_id == user_id))
    }
}
