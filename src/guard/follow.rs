// Follow edge rules: no self-follow, no duplicate edge.

use async_trait::async_trait;

use super::hooks::{WriteContext, WriteHook};
use crate::entities::{Document, Follow};
use crate::error::{DomainError, DomainResult};
use crate::storage::{EntityStore, Filter};

/// Rejects self-follows and duplicate follow edges.
pub struct FollowGuard;

impl FollowGuard {
    pub async fn validate(candidate: &Follow, store: &dyn EntityStore) -> DomainResult<()> {
        if candidate.follower_id == candidate.following_id {
            return Err(DomainError::SelfFollow);
        }

        let existing = store
            .find_one(Filter::FollowEdge {
                follower_id: candidate.follower_id,
                following_id: candidate.following_id,
            })
            .await
            .map_err(super::storage_unavailable)?;
        // Re-upserting the same edge document is not a duplicate.
        if existing.is_some_and(|doc| doc.id() != candidate.id) {
            return Err(DomainError::DuplicateFollow {
                follower_id: candidate.follower_id,
                following_id: candidate.following_id,
            });
        }

        Ok(())
    }
}

#[async_trait]
impl WriteHook for FollowGuard {
    fn name(&self) -> &'static str {
        "follow_guard"
    }

    async fn run(
        &self,
        doc: &mut Document,
        _ctx: &WriteContext,
        store: &dyn EntityStore,
    ) -> DomainResult<()> {
        if let Document::Follow(follow) = doc {
            Self::validate(follow, store).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[tokio::test]
    async fn self_follow_is_rejected() {
        let store = MemoryStore::new();
        let err = FollowGuard::validate(&Follow::new(1, 1, 1), &store)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::SelfFollow));
    }

    #[tokio::test]
    async fn duplicate_edge_is_rejected() {
        let store = MemoryStore::new();
        store
            .upsert(Document::Follow(Follow::new(1, 10, 20)))
            .await
            .unwrap();

        let err = FollowGuard::validate(&Follow::new(2, 10, 20), &store)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DomainError::DuplicateFollow {
                follower_id: 10,
                following_id: 20
            }
        ));
    }

    #[tokio::test]
    async fn reverse_edge_is_a_different_edge() {
        let store = MemoryStore::new();
        store
            .upsert(Document::Follow(Follow::new(1, 10, 20)))
            .await
            .unwrap();

        FollowGuard::validate(&Follow::new(2, 20, 10), &store)
            .await
            .unwrap();
    }
}
