//! Trade repository.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use trade_social_core::error::StoreError;
use trade_social_core::validation::NewTrade;

use crate::models::TradeRecord;
use crate::store::{Page, StoreResult, TradeStore};

use super::map_sqlx;

/// Repository for trade rows.
#[derive(Debug, Clone)]
pub struct TradeRepository {
    pool: PgPool,
}

impl TradeRepository {
    /// Creates a new repository instance.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TradeStore for TradeRepository {
    async fn insert_trade(&self, owner_id: Uuid, trade: &NewTrade) -> StoreResult<TradeRecord> {
        let record = sqlx::query_as::<_, TradeRecord>(
            r"
            INSERT INTO trades
                (owner_id, asset_pair, trade_type, entry_price, exit_price,
                 position_size, strategy, notes, status, trade_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, owner_id, asset_pair, trade_type, entry_price, exit_price,
                      position_size, pnl_percentage, strategy, notes, status,
                      trade_date, created_at, updated_at
            ",
        )
        .bind(owner_id)
        .bind(&trade.asset_pair)
        .bind(trade.trade_type.as_str())
        .bind(trade.entry_price)
        .bind(trade.exit_price)
        .bind(trade.position_size)
        .bind(trade.strategy.as_str())
        .bind(&trade.notes)
        .bind(&trade.status)
        .bind(trade.trade_date)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(record)
    }

    async fn trade_by_id(&self, trade_id: Uuid) -> StoreResult<Option<TradeRecord>> {
        let record = sqlx::query_as::<_, TradeRecord>(
            r"
            SELECT id, owner_id, asset_pair, trade_type, entry_price, exit_price,
                   position_size, pnl_percentage, strategy, notes, status,
                   trade_date, created_at, updated_at
            FROM trades
            WHERE id = $1
            ",
        )
        .bind(trade_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(record)
    }

    async fn trades_page(&self, page: Page) -> StoreResult<Vec<TradeRecord>> {
        let records = sqlx::query_as::<_, TradeRecord>(
            r"
            SELECT id, owner_id, asset_pair, trade_type, entry_price, exit_price,
                   position_size, pnl_percentage, strategy, notes, status,
                   trade_date, created_at, updated_at
            FROM trades
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            ",
        )
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(records)
    }

    async fn trades_for_user(&self, owner_id: Uuid, page: Page) -> StoreResult<Vec<TradeRecord>> {
        let records = sqlx::query_as::<_, TradeRecord>(
            r"
            SELECT id, owner_id, asset_pair, trade_type, entry_price, exit_price,
                   position_size, pnl_percentage, strategy, notes, status,
                   trade_date, created_at, updated_at
            FROM trades
            WHERE owner_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(owner_id)
        .bind(page.limit)
        .bind(page.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_sqlx)?;

        Ok(records)
    }

    async fn update_trade(
        &self,
        trade_id: Uuid,
        owner_id: Uuid,
        trade: &NewTrade,
    ) -> StoreResult<TradeRecord> {
        let record = sqlx::query_as::<_, TradeRecord>(
            r"
            UPDATE trades
            SET asset_pair = $3, trade_type = $4, entry_price = $5, exit_price = $6,
                position_size = $7, strategy = $8, notes = $9, status = $10,
                trade_date = $11, updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, owner_id, asset_pair, trade_type, entry_price, exit_price,
                      position_size, pnl_percentage, strategy, notes, status,
                      trade_date, created_at, updated_at
            ",
        )
        .bind(trade_id)
        .bind(owner_id)
        .bind(&trade.asset_pair)
        .bind(trade.trade_type.as_str())
        .bind(trade.entry_price)
        .bind(trade.exit_price)
        .bind(trade.position_size)
        .bind(trade.strategy.as_str())
        .bind(&trade.notes)
        .bind(&trade.status)
        .bind(trade.trade_date)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx)?;

        record.ok_or(StoreError::NotFound)
    }

    async fn delete_trade(&self, trade_id: Uuid, owner_id: Uuid) -> StoreResult<()> {
        let result = sqlx::query(
            r"
            DELETE FROM trades
            WHERE id = $1 AND owner_id = $2
            ",
        )
        .bind(trade_id)
        .bind(owner_id)
        .execute(&self.pool)
        .await
        .map_err(map_sqlx)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
