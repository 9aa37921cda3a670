//! Ranking repository.
//!
//! Both reads are pass-throughs to aggregates the store owns: the
//! `user_rankings` view and the `get_user_stats` function. The scoring
//! formula lives there; this side only coalesces nullable columns into the
//! expected shape.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{UserRanking, UserStats};
use crate::store::{RankingStore, StoreResult};

use super::map_sqlx;

/// Repository for external ranking aggregates.
#[derive(Debug, Clone)]
pub struct RankingRepository {
    pool: PgPool,
}

impl RankingRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RankingStore for RankingRepository {
    async fn top_rankings(&self, limit: i64) -> StoreResult<Vec<UserRanking>> {
        let records = sqlx::query_as::<_, UserRanking>(
            r"
            SELECT user_id, username, avatar_url, total_trades, total_ratings,
                   COALESCE(average_rating, 0)::float8 AS average_rating,
                   COALESCE(rank_score, 0)::float8 AS rank_score,
                   closed_trades,
                   COALESCE(average_pnl, 0)::float8 AS average_pnl
            FROM user_rankings
            LIMIT $1
            ",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(records)
    }

    async fn user_stats(&self, user_id: Uuid) -> StoreResult<Option<UserStats>> {
        let record = sqlx::query_as::<_, UserStats>(
            r"
            SELECT user_id, total_trades, total_ratings,
                   COALESCE(average_rating, 0)::float8 AS average_rating,
                   total_closed_trades,
                   COALESCE(average_pnl, 0)::float8 AS average_pnl
            FROM get_user_stats($1)
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(record)
    }
}
