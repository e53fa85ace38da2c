// Follow-edge - directed relationship record from a follower to a followed
// user. The (follower_id, following_id) pair is unique across the edge set.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{FollowId, UserId};
use crate::store::entity_store::Record;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowEdge {
    pub id: FollowId,
    pub follower_id: UserId,
    pub following_id: UserId,
    pub timestamp: DateTime<Utc>,
}

impl FollowEdge {
    pub fn new(follower_id: UserId, following_id: UserId, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: FollowId::new(0),
            follower_id,
            following_id,
            timestamp,
        }
    }
}

impl Record for FollowEdge {
    fn id(&self) -> i64 {
        self.id.value()
    }

    fn set_id(&mut self, id: i64) {
        self.id = FollowId::new(id);
    }

    fn label() -> &'static str {
        "Follow relationship"
    }
}
