use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::entities::EntityKind;
use crate::guard::comment_thread::MAX_DEPTH;

/// Domain-level write rejections plus collaborator failures.
///
/// Every validation kind carries enough context for a precise, stable
/// message; callers match on the variant, users see `Display`.
#[derive(Debug)]
pub enum DomainError {
    // Comment thread
    ParentNotFound(i64),
    CrossResourceParent,
    SelfParent,
    DepthExceeded,
    // Enrollment
    DuplicateEnrollment { course_id: i64, user_id: i64 },
    InvalidCompletionOrder,
    ProgressOutOfRange(f32),
    // Follow
    SelfFollow,
    DuplicateFollow { follower_id: i64, following_id: i64 },
    // Course ratings
    RatingOutOfRange(u8),
    // News
    DuplicateSlug(String),
    // Collaborators / wiring
    StorageUnavailable(anyhow::Error),
    UnregisteredKind(EntityKind),
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DomainError::ParentNotFound(id) => {
                write!(f, "parent comment {} not found", id)
            }
            DomainError::CrossResourceParent => {
                write!(f, "parent comment belongs to a different resource")
            }
            DomainError::SelfParent => write!(f, "a comment cannot be its own parent"),
            DomainError::DepthExceeded => {
                write!(f, "maximum comment depth of {} exceeded", MAX_DEPTH)
            }
            DomainError::DuplicateEnrollment { course_id, user_id } => write!(
                f,
                "user {} is already enrolled in course {}",
                user_id, course_id
            ),
            DomainError::InvalidCompletionOrder => {
                write!(f, "completion date cannot precede enrollment date")
            }
            DomainError::ProgressOutOfRange(p) => {
                write!(f, "progress {} is outside the range 0-100", p)
            }
            DomainError::SelfFollow => write!(f, "a user cannot follow themselves"),
            DomainError::DuplicateFollow {
                follower_id,
                following_id,
            } => write!(
                f,
                "user {} already follows user {}",
                follower_id, following_id
            ),
            DomainError::RatingOutOfRange(r) => {
                write!(f, "rating {} is outside the range 1-5", r)
            }
            DomainError::DuplicateSlug(slug) => {
                write!(f, "slug '{}' is already in use", slug)
            }
            DomainError::StorageUnavailable(err) => {
                write!(f, "storage unavailable: {}", err)
            }
            DomainError::UnregisteredKind(kind) => {
                write!(f, "no write pipeline registered for entity kind {}", kind)
            }
        }
    }
}

impl std::error::Error for DomainError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DomainError::StorageUnavailable(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = match &self {
            DomainError::ParentNotFound(_) => StatusCode::NOT_FOUND,
            DomainError::CrossResourceParent
            | DomainError::SelfParent
            | DomainError::DepthExceeded
            | DomainError::InvalidCompletionOrder
            | DomainError::ProgressOutOfRange(_)
            | DomainError::SelfFollow
            | DomainError::RatingOutOfRange(_) => StatusCode::BAD_REQUEST,
            DomainError::DuplicateEnrollment { .. }
            | DomainError::DuplicateFollow { .. }
            | DomainError::DuplicateSlug(_) => StatusCode::CONFLICT,
            DomainError::StorageUnavailable(err) => {
                tracing::error!("storage unavailable: {}", err);
                StatusCode::SERVICE_UNAVAILABLE
            }
            DomainError::UnregisteredKind(kind) => {
                tracing::error!("no write pipeline registered for {}", kind);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
