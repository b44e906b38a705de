// Threaded comment entity - attaches to an article, news post, or course

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// What a comment is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResourceKind {
    Article,
    News,
    Course,
}

/// A threaded comment. `parent_id` points at another comment on the same
/// resource; the chain is immutable once written.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub resource_kind: ResourceKind,
    pub resource_id: i64,
    pub author_id: i64,
    pub text: String,
    pub parent_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Root comment on a resource (no parent).
    pub fn root(id: i64, resource_kind: ResourceKind, resource_id: i64, author_id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            resource_kind,
            resource_id,
            author_id,
            text: text.into(),
            parent_id: None,
            created_at: Utc::now(),
        }
    }

    /// Reply to an existing comment on the same resource.
    pub fn reply_to(parent: &Comment, id: i64, author_id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            resource_kind: parent.resource_kind,
            resource_id: parent.resource_id,
            author_id,
            text: text.into(),
            parent_id: Some(parent.id),
            created_at: Utc::now(),
        }
    }
}
