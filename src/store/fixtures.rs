// Fixture loading - static seed records for every entity type. The compiled
// in defaults ship with the binary; a fixture directory of the same JSON
// files can stand in for them at startup.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::models::{Comment, FollowEdge, Post, User};
use crate::store::Stores;

const USERS_JSON: &str = include_str!("../../data/users.json");
const POSTS_JSON: &str = include_str!("../../data/posts.json");
const COMMENTS_JSON: &str = include_str!("../../data/comments.json");
const FOLLOWS_JSON: &str = include_str!("../../data/follows.json");

#[derive(Debug, Clone)]
pub struct FixtureSet {
    pub users: Vec<User>,
    pub posts: Vec<Post>,
    pub comments: Vec<Comment>,
    pub follows: Vec<FollowEdge>,
}

fn parse<T: DeserializeOwned>(source: &str, what: &str) -> AppResult<Vec<T>> {
    serde_json::from_str(source)
        .map_err(|e| AppError::Configuration(format!("Invalid {} fixture: {}", what, e)))
}

fn read_file<T: DeserializeOwned>(dir: &Path, file: &str, what: &str) -> AppResult<Vec<T>> {
    let path = dir.join(file);
    let source = fs::read_to_string(&path).map_err(|e| {
        AppError::Configuration(format!("Failed to read {}: {}", path.display(), e))
    })?;
    parse(&source, what)
}

impl FixtureSet {
    pub fn empty() -> Self {
        Self {
            users: Vec::new(),
            posts: Vec::new(),
            comments: Vec::new(),
            follows: Vec::new(),
        }
    }

    /// The seed data compiled into the binary.
    pub fn builtin() -> AppResult<Self> {
        Ok(Self {
            users: parse(USERS_JSON, "users")?,
            posts: parse(POSTS_JSON, "posts")?,
            comments: parse(COMMENTS_JSON, "comments")?,
            follows: parse(FOLLOWS_JSON, "follows")?,
        })
    }

    /// Load equivalent seed data from a directory of per-entity JSON files.
    pub fn from_dir(dir: &Path) -> AppResult<Self> {
        Ok(Self {
            users: read_file(dir, "users.json", "users")?,
            posts: read_file(dir, "posts.json", "posts")?,
            comments: read_file(dir, "comments.json", "comments")?,
            follows: read_file(dir, "follows.json", "follows")?,
        })
    }

    /// Seed every store with this fixture set.
    pub fn apply(&self, stores: &Stores) {
        stores.users.seed(self.users.clone());
        stores.posts.seed(self.posts.clone());
        stores.comments.seed(self.comments.clone());
        stores.follows.seed(self.follows.clone());
        info!(
            "Seeded stores: {} users, {} posts, {} comments, {} follows",
            self.users.len(),
            self.posts.len(),
            self.comments.len(),
            self.follows.len()
        );
    }
}
