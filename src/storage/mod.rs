//! Storage collaborator seam.
//!
//! The guard does not persist anything itself; it talks to whatever
//! document store the application wires in through `EntityStore`. The
//! store owns the uniqueness indexes as the source of truth - validator
//! existence checks are only a fast-path rejection, since two concurrent
//! writes can race between the check and the commit. Implementations must
//! reject a duplicate commit atomically with `StoreError::UniqueViolation`
//! so the interceptor can surface the same domain error either way.

pub mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use std::fmt;

use crate::entities::{Document, EntityKind};

/// Unique indexes the store is expected to enforce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UniqueIndex {
    /// One enrollment per `(course_id, user_id)`.
    EnrollmentPair,
    /// One follow edge per `(follower_id, following_id)`.
    FollowEdge,
    /// News slugs are globally unique.
    NewsSlug,
}

/// Typed lookup filters. One variant per secondary-key lookup the guard
/// performs; no query language is owned by this layer.
#[derive(Debug, Clone)]
pub enum Filter {
    EnrollmentPair { course_id: i64, user_id: i64 },
    FollowEdge { follower_id: i64, following_id: i64 },
    NewsSlug(String),
}

/// Failures from the storage collaborator.
#[derive(Debug)]
pub enum StoreError {
    /// The store could not be reached or failed mid-operation. Never
    /// reinterpreted as a validation failure.
    Unavailable(anyhow::Error),
    /// An atomic commit hit one of the uniqueness indexes.
    UniqueViolation(UniqueIndex),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(err) => write!(f, "store unavailable: {}", err),
            StoreError::UniqueViolation(index) => {
                write!(f, "unique index violation: {:?}", index)
            }
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Generic CRUD surface of the backing document store.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Fetch a document by kind and id.
    async fn get(&self, kind: EntityKind, id: i64) -> StoreResult<Option<Document>>;

    /// Fetch at most one document matching a secondary-key filter.
    async fn find_one(&self, filter: Filter) -> StoreResult<Option<Document>>;

    /// Insert or replace a document, enforcing the uniqueness indexes
    /// atomically with the commit. Returns the stored document.
    async fn upsert(&self, doc: Document) -> StoreResult<Document>;
}
