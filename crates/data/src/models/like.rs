//! Like model.
//!
//! Presence of a row IS the liked state; there is no boolean flag.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored like row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct LikeRecord {
    pub id: Uuid,
    pub trade_id: Uuid,
    pub user_id: Uuid,
}

/// Grouped like count for one trade out of a requested id set.
#[derive(Debug, Clone, Copy, sqlx::FromRow)]
pub struct LikeCountRow {
    pub trade_id: Uuid,
    pub like_count: i64,
}
