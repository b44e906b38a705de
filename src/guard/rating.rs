// Course rating aggregation: bounds-check the entries, then rewrite the
// derived average/count from the live collection.

use async_trait::async_trait;

use super::hooks::{WriteContext, WriteHook};
use crate::entities::{Document, Rating};
use crate::error::{DomainError, DomainResult};
use crate::storage::EntityStore;

pub const MIN_RATING: u8 = 1;
pub const MAX_RATING: u8 = 5;

/// Recomputes `average_rating` and `total_ratings` for a course.
pub struct RatingAggregator;

impl RatingAggregator {
    /// Full recompute from the live collection, never a running delta, so
    /// the aggregates stay exact under out-of-order or batched updates.
    /// Returns `(average, count)`; the average is `0.0` for an empty
    /// collection.
    pub fn recompute(ratings: &[Rating]) -> (f64, u32) {
        if ratings.is_empty() {
            return (0.0, 0);
        }
        let sum: u64 = ratings.iter().map(|r| u64::from(r.rating)).sum();
        let count = ratings.len() as u32;
        (sum as f64 / count as f64, count)
    }

    /// Every entry must be within 1..=5 before the aggregates are trusted.
    fn check_bounds(ratings: &[Rating]) -> DomainResult<()> {
        for entry in ratings {
            if !(MIN_RATING..=MAX_RATING).contains(&entry.rating) {
                return Err(DomainError::RatingOutOfRange(entry.rating));
            }
        }
        Ok(())
    }
}

#[async_trait]
impl WriteHook for RatingAggregator {
    fn name(&self) -> &'static str {
        "rating_aggregator"
    }

    // Runs on every course write, not only when the caller flags the
    // ratings collection as changed: the aggregates are derived fields
    // and must never be independently settable.
    async fn run(
        &self,
        doc: &mut Document,
        _ctx: &WriteContext,
        _store: &dyn EntityStore,
    ) -> DomainResult<()> {
        if let Document::Course(course) = doc {
            Self::check_bounds(&course.ratings)?;
            let (average, count) = Self::recompute(&course.ratings);
            course.average_rating = average;
            course.total_ratings = count;
        }
        Ok(())
    }
}
