use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::core::UserId;
use crate::error::{AppError, AppResult};
use crate::models::{NewUser, User, UserPatch};
use crate::repo::Repository;
use crate::store::{EntityStore, Latency, OpClass};

#[derive(Clone)]
pub struct UserRepository {
    store: Arc<EntityStore<User>>,
    latency: Latency,
}

impl UserRepository {
    pub fn new(store: Arc<EntityStore<User>>, latency: Latency) -> Self {
        Self { store, latency }
    }

    /// Case-insensitive substring search over username and display name.
    /// A blank query matches nothing.
    pub async fn search(&self, query: &str) -> AppResult<Vec<User>> {
        self.latency.simulate(OpClass::Query).await;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.store.select(|u| {
            u.username.to_lowercase().contains(&needle)
                || u.display_name.to_lowercase().contains(&needle)
        }))
    }

    /// The demo session's viewer: the first seeded user.
    pub async fn current_user(&self) -> AppResult<User> {
        self.latency.simulate(OpClass::Read).await;
        self.store
            .all()
            .into_iter()
            .next()
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

#[async_trait]
impl Repository for UserRepository {
    type Id = UserId;
    type Entity = User;
    type Create = NewUser;
    type Patch = UserPatch;

    async fn list(&self) -> AppResult<Vec<User>> {
        self.latency.simulate(OpClass::Query).await;
        Ok(self.store.all())
    }

    async fn get_by_id(&self, id: UserId) -> AppResult<User> {
        self.latency.simulate(OpClass::Read).await;
        self.store
            .get(id.value())
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }

    async fn create(&self, payload: NewUser) -> AppResult<User> {
        payload.validate()?;
        self.latency.simulate(OpClass::Write).await;
        let username = payload.username.to_lowercase();
        if self
            .store
            .find(|u| u.username.to_lowercase() == username)
            .is_some()
        {
            return Err(AppError::Validation(
                "Username is already taken".to_string(),
            ));
        }
        let user = self.store.insert(payload.into_record(Utc::now()));
        info!("create: User {} ({})", user.id, user.username);
        Ok(user)
    }

    async fn update(&self, id: UserId, patch: UserPatch) -> AppResult<User> {
        self.latency.simulate(OpClass::Write).await;
        let user = self.store.update_with(id.value(), |u| patch.apply(u))?;
        info!("update: User {} updated", user.id);
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> AppResult<User> {
        self.latency.simulate(OpClass::Write).await;
        let user = self.store.remove(id.value())?;
        info!("delete: User {} removed", user.id);
        Ok(user)
    }
}
