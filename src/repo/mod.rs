// Repository Interface - per-entity CRUD and query operations over the
// entity stores, each preceded by the simulated latency. One generic
// contract, instantiated per entity type.

pub mod comments;
pub mod posts;
pub mod users;

pub use comments::CommentRepository;
pub use posts::PostRepository;
pub use users::UserRepository;

use async_trait::async_trait;

use crate::error::AppResult;

/// The generic repository contract. Entity-specific queries (search, feed,
/// by-owner) live on the concrete repositories.
#[async_trait]
pub trait Repository: Send + Sync {
    type Id: Copy + Send + 'static;
    type Entity: Send + 'static;
    type Create: Send + 'static;
    type Patch: Send + 'static;

    /// Full ordered sequence of live entities as detached copies.
    async fn list(&self) -> AppResult<Vec<Self::Entity>>;

    /// Single entity, failing with `NotFound` when no entity has the id.
    async fn get_by_id(&self, id: Self::Id) -> AppResult<Self::Entity>;

    /// Validate the payload, assign the next id, stamp the creation time and
    /// zero the counters.
    async fn create(&self, payload: Self::Create) -> AppResult<Self::Entity>;

    /// Merge partial fields onto the record. The id is not part of the patch
    /// payload, so it cannot change.
    async fn update(&self, id: Self::Id, patch: Self::Patch) -> AppResult<Self::Entity>;

    /// Remove the record and return the removed copy.
    async fn delete(&self, id: Self::Id) -> AppResult<Self::Entity>;
}
