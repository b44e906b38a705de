// Enrollment entity - one user's membership in one course

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's enrollment in a course. At most one per `(course_id, user_id)`
/// pair; the pair is a unique index in the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: i64,
    pub course_id: i64,
    pub user_id: i64,
    pub enrolled_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    /// Percent complete, 0 to 100.
    pub progress: f32,
    pub last_accessed_at: Option<DateTime<Utc>>,
}

impl Enrollment {
    pub fn new(id: i64, course_id: i64, user_id: i64) -> Self {
        let now = Utc::now();
        Self {
            id,
            course_id,
            user_id,
            enrolled_at: now,
            completed_at: None,
            progress: 0.0,
            last_accessed_at: Some(now),
        }
    }
}
