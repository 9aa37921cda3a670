//! Trade record model.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use trade_social_core::types::{Strategy, TradeStatus, TradeType};

use super::stats::TradeStats;

/// A stored trade row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TradeRecord {
    pub id: Uuid,
    /// Profile id of the submitting user.
    pub owner_id: Uuid,
    pub asset_pair: String,
    /// Trade direction: "Long" or "Short".
    pub trade_type: String,
    pub entry_price: Decimal,
    pub exit_price: Option<Decimal>,
    pub position_size: Option<Decimal>,
    /// Profit/loss percentage, populated store-side; never written here.
    pub pnl_percentage: Option<Decimal>,
    /// Strategy label: "Scalp", "Swing", or "Day trade".
    pub strategy: String,
    pub notes: Option<String>,
    /// Status label; "Open" or "Closed" from the UI, stored verbatim.
    pub status: String,
    pub trade_date: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TradeRecord {
    /// Returns the parsed trade direction.
    #[must_use]
    pub fn parsed_trade_type(&self) -> Option<TradeType> {
        TradeType::parse(&self.trade_type)
    }

    /// Returns the parsed strategy.
    #[must_use]
    pub fn parsed_strategy(&self) -> Option<Strategy> {
        Strategy::parse(&self.strategy)
    }

    /// Returns the parsed status, if it is one of the UI values.
    #[must_use]
    pub fn parsed_status(&self) -> Option<TradeStatus> {
        TradeStatus::parse(&self.status)
    }

    /// Returns true if this trade is still open.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open.as_str()
    }

    /// Returns true if this trade has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == TradeStatus::Closed.as_str()
    }
}

/// A trade joined with its owner and recomputed social aggregates.
///
/// Aggregates are rebuilt from raw rating/like rows on every read; nothing
/// here is stored denormalized.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TradeWithStats {
    #[serde(flatten)]
    pub trade: TradeRecord,
    pub username: String,
    pub avatar_url: Option<String>,
    pub average_rating: f64,
    pub total_ratings: i64,
    pub like_count: i64,
}

impl TradeWithStats {
    /// The aggregate slice of this view.
    #[must_use]
    pub fn stats(&self) -> TradeStats {
        TradeStats {
            average_rating: self.average_rating,
            total_ratings: self.total_ratings,
            like_count: self.like_count,
        }
    }
}
