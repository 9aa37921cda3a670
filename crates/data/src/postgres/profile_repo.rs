//! Profile repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::models::ProfileRecord;
use crate::store::{ProfileStore, StoreResult};

use super::map_sqlx;

/// Repository for profile rows.
#[derive(Debug, Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn profile_by_id(&self, user_id: Uuid) -> StoreResult<Option<ProfileRecord>> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r"
            SELECT id, username, avatar_url, bio, created_at, updated_at
            FROM profiles
            WHERE id = $1
            ",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(record)
    }

    async fn profile_by_username(&self, username: &str) -> StoreResult<Option<ProfileRecord>> {
        let record = sqlx::query_as::<_, ProfileRecord>(
            r"
            SELECT id, username, avatar_url, bio, created_at, updated_at
            FROM profiles
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(record)
    }

    async fn profiles_by_ids(&self, user_ids: &[Uuid]) -> StoreResult<Vec<ProfileRecord>> {
        let records = sqlx::query_as::<_, ProfileRecord>(
            r"
            SELECT id, username, avatar_url, bio, created_at, updated_at
            FROM profiles
            WHERE id = ANY($1)
            ",
        )
        .bind(user_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(records)
    }
}
