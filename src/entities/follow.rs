// Follow edge between two users

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A directed follow edge. `(follower_id, following_id)` is unique and a
/// user never follows themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Follow {
    pub id: i64,
    pub follower_id: i64,
    pub following_id: i64,
    pub followed_at: DateTime<Utc>,
}

impl Follow {
    pub fn new(id: i64, follower_id: i64, following_id: i64) -> Self {
        Self {
            id,
            follower_id,
            following_id,
            followed_at: Utc::now(),
        }
    }
}
