//! The invariant-enforcement core: per-kind validators and derivations,
//! the registry that assembles them into pipelines, and the interceptor
//! that runs a pipeline in front of every governed write.

pub mod comment_thread;
pub mod enrollment;
pub mod follow;
pub mod hooks;
pub mod interceptor;
pub mod news_derivation;
pub mod rating;
pub mod registry;

pub use comment_thread::CommentThreadValidator;
pub use enrollment::EnrollmentValidator;
pub use follow::FollowGuard;
pub use hooks::{WriteContext, WriteHook, WriteOperation};
pub use interceptor::WriteInterceptor;
pub use news_derivation::NewsDerivation;
pub use rating::RatingAggregator;
pub use registry::EntityRegistry;

use crate::error::DomainError;
use crate::storage::StoreError;

/// Maps a storage failure on a read path. Reads never legitimately hit a
/// unique index, so both variants surface as unavailability.
pub(crate) fn storage_unavailable(err: StoreError) -> DomainError {
    match err {
        StoreError::Unavailable(source) => DomainError::StorageUnavailable(source),
        StoreError::UniqueViolation(index) => DomainError::StorageUnavailable(anyhow::anyhow!(
            "unexpected unique violation on read: {:?}",
            index
        )),
    }
}
