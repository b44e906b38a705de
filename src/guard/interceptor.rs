// Write interceptor - the single entry point every governed write goes
// through before it reaches the store.

use std::sync::Arc;
use tracing::{debug, instrument, warn};

use super::hooks::WriteContext;
use super::registry::EntityRegistry;
use crate::entities::Document;
use crate::error::{DomainError, DomainResult};
use crate::storage::{EntityStore, StoreError};

/// Runs the registered pipeline for a candidate write, then commits it.
///
/// Guarantees:
/// - hooks run in registration order; the first failure aborts the write
///   and the store is never called for a rejected candidate;
/// - only derivation hooks mutate the candidate, validators decide only;
/// - a storage-level unique violation comes back as the same domain error
///   the fast-path validator would have produced, so callers see one
///   error surface whether or not two writes raced.
pub struct WriteInterceptor {
    registry: EntityRegistry,
    store: Arc<dyn EntityStore>,
}

impl WriteInterceptor {
    pub fn new(registry: EntityRegistry, store: Arc<dyn EntityStore>) -> Self {
        Self { registry, store }
    }

    /// Interceptor with the standard pipelines over the given store.
    pub fn with_defaults(store: Arc<dyn EntityStore>) -> Self {
        Self::new(EntityRegistry::with_default_pipelines(), store)
    }

    #[instrument(skip(self, candidate, ctx), fields(kind = %candidate.kind(), id = candidate.id()))]
    pub async fn apply(
        &self,
        mut candidate: Document,
        ctx: WriteContext,
    ) -> DomainResult<Document> {
        let kind = candidate.kind();
        let pipeline = self
            .registry
            .pipeline(kind)
            .ok_or(DomainError::UnregisteredKind(kind))?;

        for hook in pipeline {
            debug!(hook = hook.name(), "running write hook");
            if let Err(err) = hook.run(&mut candidate, &ctx, self.store.as_ref()).await {
                warn!(hook = hook.name(), error = %err, "write rejected");
                return Err(err);
            }
        }

        // Computed before the candidate moves into the store: on a unique
        // violation this is the losing side of a race the validator could
        // not see, and it must surface as the same domain error.
        let conflict = Self::duplicate_error(&candidate);

        match self.store.upsert(candidate).await {
            Ok(stored) => {
                debug!("write committed");
                Ok(stored)
            }
            Err(StoreError::Unavailable(source)) => Err(DomainError::StorageUnavailable(source)),
            Err(StoreError::UniqueViolation(index)) => {
                warn!(?index, "commit lost a uniqueness race");
                Err(conflict.unwrap_or_else(|| {
                    DomainError::StorageUnavailable(anyhow::anyhow!(
                        "unexpected unique violation on {:?}",
                        index
                    ))
                }))
            }
        }
    }

    /// The domain error a uniqueness conflict on this document maps to.
    fn duplicate_error(doc: &Document) -> Option<DomainError> {
        match doc {
            Document::Enrollment(e) => Some(DomainError::DuplicateEnrollment {
                course_id: e.course_id,
                user_id: e.user_id,
            }),
            Document::Follow(f) => Some(DomainError::DuplicateFollow {
                follower_id: f.follower_id,
                following_id: f.following_id,
            }),
            Document::News(n) => Some(DomainError::DuplicateSlug(n.slug.clone())),
            Document::Comment(_) | Document::Course(_) => None,
        }
    }
}
