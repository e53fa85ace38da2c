// In-memory storage layer: generic entity stores, fixture seeding and the
// simulated-latency timer.

pub mod entity_store;
pub mod fixtures;
pub mod latency;

pub use entity_store::{EntityStore, Record};
pub use fixtures::FixtureSet;
pub use latency::{Latency, OpClass};

use std::sync::Arc;

use crate::models::{Comment, FollowEdge, Post, User};

/// One store per entity type. Constructed fresh per process (or per test)
/// and injected into the repositories and services; there is no hidden
/// module-level state.
#[derive(Clone)]
pub struct Stores {
    pub users: Arc<EntityStore<User>>,
    pub posts: Arc<EntityStore<Post>>,
    pub comments: Arc<EntityStore<Comment>>,
    pub follows: Arc<EntityStore<FollowEdge>>,
}

impl Stores {
    pub fn new() -> Self {
        Self {
            users: Arc::new(EntityStore::new()),
            posts: Arc::new(EntityStore::new()),
            comments: Arc::new(EntityStore::new()),
            follows: Arc::new(EntityStore::new()),
        }
    }
}

impl Default for Stores {
    fn default() -> Self {
        Self::new()
    }
}
