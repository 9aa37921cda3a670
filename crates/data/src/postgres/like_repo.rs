//! Like repository.
//!
//! The `likes` table carries a unique index on `(trade_id, user_id)`.
//! Deletes key on the pair rather than the row id, so a toggle never needs
//! to know which concurrent insert won.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use trade_social_core::error::StoreError;

use crate::models::{LikeCountRow, LikeRecord};
use crate::store::{LikeStore, StoreResult};

use super::map_sqlx;

/// Repository for like rows.
#[derive(Debug, Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeStore for LikeRepository {
    async fn insert_like(&self, trade_id: Uuid, user_id: Uuid) -> StoreResult<LikeRecord> {
        let record = sqlx::query_as::<_, LikeRecord>(
            r"
            INSERT INTO likes (trade_id, user_id)
            VALUES ($1, $2)
            RETURNING id, trade_id, user_id
            ",
        )
        .bind(trade_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(record)
    }

    async fn delete_like(&self, trade_id: Uuid, user_id: Uuid) -> StoreResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM likes
            WHERE trade_id = $1 AND user_id = $2
            ",
        )
        .bind(trade_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn like_by_pair(&self, trade_id: Uuid, user_id: Uuid) -> StoreResult<Option<LikeRecord>> {
        let record = sqlx::query_as::<_, LikeRecord>(
            r"
            SELECT id, trade_id, user_id
            FROM likes
            WHERE trade_id = $1 AND user_id = $2
            ",
        )
        .bind(trade_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(record)
    }

    async fn like_counts(&self, trade_ids: &[Uuid]) -> StoreResult<Vec<LikeCountRow>> {
        let rows = sqlx::query_as::<_, LikeCountRow>(
            r"
            SELECT trade_id, COUNT(*) AS like_count
            FROM likes
            WHERE trade_id = ANY($1)
            GROUP BY trade_id
            ",
        )
        .bind(trade_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(rows)
    }
}
