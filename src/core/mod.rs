// Core types and primitives

pub mod ids;

pub use ids::{CommentId, FollowId, PostId, UserId};
