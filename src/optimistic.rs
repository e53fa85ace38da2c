// Optimistic update - apply a local state change before the service
// confirms it, then adopt the authoritative result or restore the snapshot
// on failure. The transition order is fixed: snapshot, apply provisional,
// await, commit-or-revert.

use std::future::Future;

/// A piece of caller-local view state driven by optimistic transitions.
#[derive(Debug, Clone)]
pub struct Optimistic<T: Clone> {
    value: T,
    revision: u64,
}

impl<T: Clone> Optimistic<T> {
    pub fn new(value: T) -> Self {
        Self { value, revision: 0 }
    }

    pub fn value(&self) -> &T {
        &self.value
    }

    /// Bumped on every state change; used to recognize stale results.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    fn set(&mut self, value: T) {
        self.value = value;
        self.revision += 1;
    }

    /// One optimistic transition: snapshot the current value, show the
    /// provisional one, await the authoritative result, then adopt it on
    /// success or restore the snapshot on failure. The error is passed back
    /// to the caller for surfacing.
    pub async fn apply<F, Fut, E>(&mut self, provisional: T, op: F) -> Result<&T, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let snapshot = self.value.clone();
        self.set(provisional);
        match op().await {
            Ok(authoritative) => {
                self.set(authoritative);
                Ok(&self.value)
            }
            Err(err) => {
                self.set(snapshot);
                Err(err)
            }
        }
    }

    /// Adopt an authoritative value only if the cell has not moved on since
    /// `revision` was observed. A late-arriving result for state that is no
    /// longer current is discarded, not applied.
    pub fn adopt_if(&mut self, revision: u64, authoritative: T) -> bool {
        if self.revision == revision {
            self.set(authoritative);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct LikeState {
        is_liked: bool,
        likes_count: u32,
    }

    #[tokio::test]
    async fn test_success_adopts_authoritative_value() {
        let mut cell = Optimistic::new(LikeState {
            is_liked: false,
            likes_count: 12,
        });

        let result = cell
            .apply(
                LikeState {
                    is_liked: true,
                    likes_count: 13,
                },
                || async {
                    Ok::<_, String>(LikeState {
                        is_liked: true,
                        likes_count: 14,
                    })
                },
            )
            .await;

        assert!(result.is_ok());
        // The authoritative count wins over the provisional guess.
        assert_eq!(cell.value().likes_count, 14);
    }

    #[tokio::test]
    async fn test_failure_restores_snapshot() {
        let before = LikeState {
            is_liked: false,
            likes_count: 12,
        };
        let mut cell = Optimistic::new(before.clone());

        let result = cell
            .apply(
                LikeState {
                    is_liked: true,
                    likes_count: 13,
                },
                || async { Err::<LikeState, _>("rejected".to_string()) },
            )
            .await;

        assert!(result.is_err());
        assert_eq!(*cell.value(), before);
    }

    #[tokio::test]
    async fn test_stale_result_is_discarded() {
        let mut cell = Optimistic::new(0u32);
        let observed = cell.revision();

        cell.apply(1, || async { Ok::<_, String>(1) }).await.unwrap();

        // The result of the await that started at `observed` arrives late.
        assert!(!cell.adopt_if(observed, 99));
        assert_eq!(*cell.value(), 1);
    }
}
