//! Read-side assembly of trades with social aggregates.
//!
//! Aggregates are folded from raw rating and like rows on every read;
//! nothing is cached or stored denormalized. A page costs one grouped
//! fetch per aggregate kind plus one profile batch, keyed by id sets,
//! regardless of page length.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use trade_social_core::config::FeedConfig;
use trade_social_core::error::Error;
use trade_social_data::models::{ProfileRecord, TradeRecord, TradeWithStats};
use trade_social_data::store::{LikeStore, Page, ProfileStore, RatingStore, TradeStore};

/// Username shown when the owning profile row is missing.
const UNKNOWN_USER: &str = "Unknown";

/// Assembles feed, profile, and single-trade views.
pub struct AggregationReader {
    trades: Arc<dyn TradeStore>,
    ratings: Arc<dyn RatingStore>,
    likes: Arc<dyn LikeStore>,
    profiles: Arc<dyn ProfileStore>,
    feed: FeedConfig,
}

impl AggregationReader {
    #[must_use]
    pub fn new(
        trades: Arc<dyn TradeStore>,
        ratings: Arc<dyn RatingStore>,
        likes: Arc<dyn LikeStore>,
        profiles: Arc<dyn ProfileStore>,
        feed: FeedConfig,
    ) -> Self {
        Self {
            trades,
            ratings,
            likes,
            profiles,
            feed,
        }
    }

    /// Newest-first page over all trades, each with owner and aggregates.
    ///
    /// # Errors
    /// `Store` if any of the batched reads fails.
    pub async fn feed(&self, limit: i64, offset: i64) -> Result<Vec<TradeWithStats>, Error> {
        let trades = self.trades.trades_page(self.page(limit, offset)).await?;
        self.assemble(trades).await
    }

    /// Newest-first page over one user's trades.
    ///
    /// # Errors
    /// `Store` if any of the batched reads fails.
    pub async fn trades_for_user(
        &self,
        owner_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TradeWithStats>, Error> {
        let trades = self
            .trades
            .trades_for_user(owner_id, self.page(limit, offset))
            .await?;
        self.assemble(trades).await
    }

    /// A single trade with owner and aggregates, `None` when it does not
    /// exist.
    ///
    /// # Errors
    /// `Store` if any read fails.
    pub async fn trade_view(&self, trade_id: Uuid) -> Result<Option<TradeWithStats>, Error> {
        let Some(trade) = self.trades.trade_by_id(trade_id).await? else {
            return Ok(None);
        };
        Ok(self.assemble(vec![trade]).await?.pop())
    }

    /// Profile lookup for the profile page.
    ///
    /// # Errors
    /// `Store` if the read fails.
    pub async fn profile_by_username(
        &self,
        username: &str,
    ) -> Result<Option<ProfileRecord>, Error> {
        Ok(self.profiles.profile_by_username(username).await?)
    }

    fn page(&self, limit: i64, offset: i64) -> Page {
        Page {
            limit: limit.clamp(1, i64::from(self.feed.page_size)),
            offset: offset.max(0),
        }
    }

    async fn assemble(&self, trades: Vec<TradeRecord>) -> Result<Vec<TradeWithStats>, Error> {
        if trades.is_empty() {
            return Ok(Vec::new());
        }

        let trade_ids: Vec<Uuid> = trades.iter().map(|trade| trade.id).collect();
        let mut owner_ids: Vec<Uuid> = trades.iter().map(|trade| trade.owner_id).collect();
        owner_ids.sort_unstable();
        owner_ids.dedup();

        let ratings: HashMap<Uuid, (f64, i64)> = self
            .ratings
            .rating_aggregates(&trade_ids)
            .await?
            .into_iter()
            .map(|row| (row.trade_id, (row.average_rating, row.total_ratings)))
            .collect();
        let likes: HashMap<Uuid, i64> = self
            .likes
            .like_counts(&trade_ids)
            .await?
            .into_iter()
            .map(|row| (row.trade_id, row.like_count))
            .collect();
        let profiles: HashMap<Uuid, ProfileRecord> = self
            .profiles
            .profiles_by_ids(&owner_ids)
            .await?
            .into_iter()
            .map(|profile| (profile.id, profile))
            .collect();

        Ok(trades
            .into_iter()
            .map(|trade| {
                let (average_rating, total_ratings) =
                    ratings.get(&trade.id).copied().unwrap_or((0.0, 0));
                let like_count = likes.get(&trade.id).copied().unwrap_or(0);
                let (username, avatar_url) = profiles
                    .get(&trade.owner_id)
                    .map_or((UNKNOWN_USER.to_string(), None), |profile| {
                        (profile.username.clone(), profile.avatar_url.clone())
                    });
                TradeWithStats {
                    trade,
                    username,
                    avatar_url,
                    average_rating,
                    total_ratings,
                    like_count,
                }
            })
            .collect())
    }
}
