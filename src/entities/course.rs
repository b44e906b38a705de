// Course entity with its embedded rating collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One user's rating of a course. Embedded in the owning `Course`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
    pub user_id: i64,
    /// 1 to 5 inclusive, checked on write.
    pub rating: u8,
    pub review: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A course document. `average_rating` and `total_ratings` are derived
/// from `ratings` on every write; values supplied by the caller are
/// overwritten by the aggregation hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Course {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub description: String,
    pub ratings: Vec<Rating>,
    pub average_rating: f64,
    pub total_ratings: u32,
}

impl Course {
    pub fn new(id: i64, title: impl Into<String>, slug: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            slug: slug.into(),
            description: description.into(),
            ratings: Vec::new(),
            average_rating: 0.0,
            total_ratings: 0,
        }
    }
}
