// News article entity with derived slug and reading time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A news article. `slug` is derived from `title` when absent and unique
/// across the store; `reading_time` is derived from `content`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub author_id: i64,
    /// Estimated minutes to read, recomputed whenever content changes.
    pub reading_time: u32,
    pub created_at: DateTime<Utc>,
}

impl News {
    pub fn new(id: i64, title: impl Into<String>, content: impl Into<String>, author_id: i64) -> Self {
        Self {
            id,
            title: title.into(),
            slug: String::new(),
            content: content.into(),
            author_id,
            reading_time: 0,
            created_at: Utc::now(),
        }
    }
}
