//! Comment repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use trade_social_core::error::StoreError;

use crate::models::{CommentRecord, CommentWithAuthor};
use crate::store::{CommentStore, StoreResult};

use super::map_sqlx;

/// Repository for comment rows.
#[derive(Debug, Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    async fn insert_comment(
        &self,
        trade_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> StoreResult<CommentRecord> {
        let record = sqlx::query_as::<_, CommentRecord>(
            r"
            INSERT INTO comments (trade_id, user_id, content)
            VALUES ($1, $2, $3)
            RETURNING id, trade_id, user_id, content, created_at
            ",
        )
        .bind(trade_id)
        .bind(user_id)
        .bind(content)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(record)
    }

    async fn delete_comment(&self, comment_id: Uuid, user_id: Uuid) -> StoreResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM comments
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(comment_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn comments_for_trade(&self, trade_id: Uuid) -> StoreResult<Vec<CommentWithAuthor>> {
        let records = sqlx::query_as::<_, CommentWithAuthor>(
            r"
            SELECT c.id, c.trade_id, c.user_id, c.content, c.created_at,
                   COALESCE(p.username, 'Unknown') AS username,
                   p.avatar_url
            FROM comments c
            LEFT JOIN profiles p ON p.id = c.user_id
            WHERE c.trade_id = $1
            ORDER BY c.created_at ASC
            ",
        )
        .bind(trade_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(records)
    }
}
