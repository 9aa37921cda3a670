//! Derived and pass-through statistics.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Per-trade aggregates, recomputed from raw rows on every read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    /// `sum / count` over rating rows, `0.0` when there are none.
    pub average_rating: f64,
    pub total_ratings: i64,
    pub like_count: i64,
}

/// Externally computed per-user aggregate. Passed through with shape
/// validation only; nothing here is recomputed locally.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserStats {
    pub user_id: Uuid,
    pub total_trades: i64,
    pub total_ratings: i64,
    pub average_rating: f64,
    pub total_closed_trades: i64,
    pub average_pnl: f64,
}

impl UserStats {
    /// The zero-valued shape for a user the aggregate has no row for.
    #[must_use]
    pub fn empty(user_id: Uuid) -> Self {
        Self {
            user_id,
            total_trades: 0,
            total_ratings: 0,
            average_rating: 0.0,
            total_closed_trades: 0,
            average_pnl: 0.0,
        }
    }
}

/// One leaderboard row from the external ranking aggregate. The scoring
/// formula is owned by the store; `rank_score` is exposed unmodified.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UserRanking {
    pub user_id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
    pub total_trades: i64,
    pub total_ratings: i64,
    pub average_rating: f64,
    pub rank_score: f64,
    pub closed_trades: i64,
    pub average_pnl: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trade_stats_default_is_zeroed() {
        let stats = TradeStats::default();
        assert!((stats.average_rating - 0.0).abs() < f64::EPSILON);
        assert_eq!(stats.total_ratings, 0);
        assert_eq!(stats.like_count, 0);
    }

    #[test]
    fn empty_user_stats_keep_the_id() {
        let user_id = Uuid::new_v4();
        let stats = UserStats::empty(user_id);
        assert_eq!(stats.user_id, user_id);
        assert_eq!(stats.total_trades, 0);
        assert!((stats.average_pnl - 0.0).abs() < f64::EPSILON);
    }
}
