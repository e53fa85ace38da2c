// Typed identifiers - newtype wrappers over the raw i64 record ids
// Identifiers are parsed once at the HTTP edge; everything below it is typed.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw id value
            pub fn value(self) -> i64 {
                self.0
            }

            /// Check if this is a valid id (positive)
            pub fn is_valid(self) -> bool {
                self.0 > 0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl std::str::FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }
    };
}

define_id!(
    /// Strongly-typed user id - prevents confusion with other numeric types
    UserId
);
define_id!(
    /// Strongly-typed post id
    PostId
);
define_id!(
    /// Strongly-typed comment id
    CommentId
);
define_id!(
    /// Strongly-typed follow-edge id
    FollowId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_operations() {
        let id = UserId::new(123);
        assert_eq!(id.value(), 123);
        assert!(id.is_valid());

        let invalid_id = PostId::new(-1);
        assert!(!invalid_id.is_valid());
    }

    #[test]
    fn test_id_parsing() {
        let id: UserId = "42".parse().unwrap();
        assert_eq!(id, UserId::new(42));
        assert!("notanid".parse::<UserId>().is_err());
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = CommentId::new(7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
        let back: CommentId = serde_json::from_str("7").unwrap();
        assert_eq!(back, id);
    }
}
