//! Rating model.
//!
//! At most one rating row exists per `(trade_id, rater_id)` pair; the store
//! enforces the uniqueness, the engine decides what a conflict means.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored rating row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct RatingRecord {
    pub id: Uuid,
    pub trade_id: Uuid,
    pub rater_id: Uuid,
    /// Integer score in `1..=5`.
    pub rating: i16,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a rating. The value is already range-checked and
/// rounded by the rating engine.
#[derive(Debug, Clone, Copy)]
pub struct NewRating {
    pub trade_id: Uuid,
    pub rater_id: Uuid,
    pub rating: i16,
}

/// Grouped rating aggregate for one trade out of a requested id set.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct RatingAggregateRow {
    pub trade_id: Uuid,
    pub average_rating: f64,
    pub total_ratings: i64,
}
