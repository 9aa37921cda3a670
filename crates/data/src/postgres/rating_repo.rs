//! Rating repository.
//!
//! The `ratings` table carries a unique index on `(trade_id, rater_id)`;
//! inserts hitting it surface as `UniqueViolation` for the engine to
//! interpret.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use trade_social_core::error::StoreError;

use crate::models::{NewRating, RatingAggregateRow, RatingRecord};
use crate::store::{RatingStore, StoreResult};

use super::map_sqlx;

/// Repository for rating rows.
#[derive(Debug, Clone)]
pub struct RatingRepository {
    pool: PgPool,
}

impl RatingRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RatingStore for RatingRepository {
    async fn insert_rating(&self, rating: &NewRating) -> StoreResult<RatingRecord> {
        let record = sqlx::query_as::<_, RatingRecord>(
            r"
            INSERT INTO ratings (trade_id, rater_id, rating)
            VALUES ($1, $2, $3)
            RETURNING id, trade_id, rater_id, rating, created_at
            ",
        )
        .bind(rating.trade_id)
        .bind(rating.rater_id)
        .bind(rating.rating)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(record)
    }

    async fn update_rating(
        &self,
        rating_id: Uuid,
        rater_id: Uuid,
        rating: i16,
    ) -> StoreResult<RatingRecord> {
        let record = sqlx::query_as::<_, RatingRecord>(
            r"
            UPDATE ratings
            SET rating = $3
            WHERE id = $1 AND rater_id = $2
            RETURNING id, trade_id, rater_id, rating, created_at
            ",
        )
        .bind(rating_id)
        .bind(rater_id)
        .bind(rating)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        record.ok_or(StoreError::NotFound)
    }

    async fn delete_rating(&self, rating_id: Uuid, rater_id: Uuid) -> StoreResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM ratings
            WHERE id = $1 AND rater_id = $2
            ",
        )
        .bind(rating_id)
        .bind(rater_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn upsert_rating(&self, rating: &NewRating) -> StoreResult<RatingRecord> {
        let record = sqlx::query_as::<_, RatingRecord>(
            r"
            INSERT INTO ratings (trade_id, rater_id, rating)
            VALUES ($1, $2, $3)
            ON CONFLICT (trade_id, rater_id) DO UPDATE
            SET rating = EXCLUDED.rating
            RETURNING id, trade_id, rater_id, rating, created_at
            ",
        )
        .bind(rating.trade_id)
        .bind(rating.rater_id)
        .bind(rating.rating)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(record)
    }

    async fn rating_by_pair(
        &self,
        trade_id: Uuid,
        rater_id: Uuid,
    ) -> StoreResult<Option<RatingRecord>> {
        let record = sqlx::query_as::<_, RatingRecord>(
            r"
            SELECT id, trade_id, rater_id, rating, created_at
            FROM ratings
            WHERE trade_id = $1 AND rater_id = $2
            ",
        )
        .bind(trade_id)
        .bind(rater_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(record)
    }

    async fn rating_aggregates(&self, trade_ids: &[Uuid]) -> StoreResult<Vec<RatingAggregateRow>> {
        let rows = sqlx::query_as::<_, RatingAggregateRow>(
            r"
            SELECT trade_id,
                   AVG(rating)::float8 AS average_rating,
                   COUNT(*) AS total_ratings
            FROM ratings
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
