// Threaded-comment parentage rules: same resource, no self-parent,
// bounded depth.

use async_trait::async_trait;

use super::hooks::{WriteContext, WriteHook};
use crate::entities::{Comment, Document, EntityKind};
use crate::error::{DomainError, DomainResult};
use crate::storage::EntityStore;

/// Maximum reply depth. A root comment is depth 0; a reply to the root is
/// depth 1. Writes that would exceed this fail, they are never truncated.
pub const MAX_DEPTH: u32 = 3;

/// Validates the parent chain of a threaded comment.
pub struct CommentThreadValidator;

impl CommentThreadValidator {
    /// Checks parent existence, same-resource parentage, self-parent, and
    /// depth. Pure read-and-decide: `candidate` is never mutated.
    ///
    /// Depth is hop count from the candidate to the root. The ancestor
    /// walk is iterative and gives up after `MAX_DEPTH` hops without
    /// reaching a root, so a malformed cycle in the stored chain fails
    /// with `DepthExceeded` instead of looping.
    pub async fn validate(
        candidate: &Comment,
        store: &dyn EntityStore,
    ) -> DomainResult<()> {
        let parent_id = match candidate.parent_id {
            Some(id) => id,
            None => return Ok(()), // root comment
        };

        // Check order: existence, then resource, then self-parent. A
        // comment pointing at its own unseen id is a missing parent, not
        // a self-parent; self-parent is only reachable when updating an
        // already-stored id.
        let parent = Self::lookup(store, parent_id).await?;
        if parent.resource_kind != candidate.resource_kind
            || parent.resource_id != candidate.resource_id
        {
            return Err(DomainError::CrossResourceParent);
        }
        if parent_id == candidate.id {
            return Err(DomainError::SelfParent);
        }

        // Hop 1 is the edge candidate -> parent; each stored ancestor
        // link adds one more.
        let mut hops: u32 = 1;
        let mut current = parent;
        while let Some(ancestor_id) = current.parent_id {
            hops += 1;
            if hops > MAX_DEPTH {
                return Err(DomainError::DepthExceeded);
            }
            current = Self::lookup(store, ancestor_id).await?;
        }

        Ok(())
    }

    async fn lookup(store: &dyn EntityStore, id: i64) -> DomainResult<Comment> {
        let doc = store
            .get(EntityKind::Comment, id)
            .await
            .map_err(super::storage_unavailable)?;
        match doc {
            Some(Document::Comment(comment)) => Ok(comment),
            _ => Err(DomainError::ParentNotFound(id)),
        }
    }
}

#[async_trait]
impl WriteHook for CommentThreadValidator {
    fn name(&self) -> &'static str {
        "comment_thread_validator"
    }

    async fn run(
        &self,
        doc: &mut Document,
        _ctx: &WriteContext,
        store: &dyn EntityStore,
    ) -> DomainResult<()> {
        if let Document::Comment(comment) = doc {
            Self::validate(comment, store).await?;
        }
        Ok(())
    }
}
