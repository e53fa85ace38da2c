use std::path::Path;

use crate::{
    config::Config,
    error::AppResult,
    repo::{CommentRepository, PostRepository, UserRepository},
    service::{EngagementService, RelationshipService},
    store::{FixtureSet, Latency, Stores},
};

/// Repositories and services wired over one set of stores. Constructed once
/// per process; tests build their own with `with_fixtures` for isolation.
#[derive(Clone)]
pub struct AppState {
    pub users: UserRepository,
    pub posts: PostRepository,
    pub comments: CommentRepository,
    pub relationships: RelationshipService,
    pub engagement: EngagementService,
}

impl AppState {
    pub fn new(config: &Config) -> AppResult<Self> {
        let fixtures = match &config.fixtures.dir {
            Some(dir) => FixtureSet::from_dir(Path::new(dir))?,
            None => FixtureSet::builtin()?,
        };
        Ok(Self::with_fixtures(&fixtures, config.latency()))
    }

    pub fn with_fixtures(fixtures: &FixtureSet, latency: Latency) -> Self {
        let stores = Stores::new();
        fixtures.apply(&stores);

        Self {
            users: UserRepository::new(stores.users.clone(), latency),
            posts: PostRepository::new(stores.posts.clone(), latency),
            comments: CommentRepository::new(
                stores.comments.clone(),
                stores.posts.clone(),
                latency,
            ),
            relationships: RelationshipService::new(
                stores.follows.clone(),
                stores.users.clone(),
                latency,
            ),
            engagement: EngagementService::new(
                stores.posts.clone(),
                stores.comments.clone(),
                latency,
            ),
        }
    }
}
