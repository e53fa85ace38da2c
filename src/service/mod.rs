// Domain services composed over the entity stores

pub mod engagement;
pub mod relationship;

pub use engagement::EngagementService;
pub use relationship::RelationshipService;
