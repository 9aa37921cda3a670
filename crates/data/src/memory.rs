//! In-memory store.
//!
//! Implements every store capability over plain collections behind one
//! mutex. Used by engine tests and offline development. Enforces the same
//! pair-uniqueness rules as the database schema, so conflict handling can
//! be exercised without a live backend.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use trade_social_core::error::StoreError;
use trade_social_core::validation::NewTrade;

use crate::models::{
    CommentRecord, CommentWithAuthor, LikeCountRow, LikeRecord, NewRating, ProfileRecord,
    RatingAggregateRow, RatingRecord, TradeRecord, UserRanking, UserStats,
};
use crate::store::{
    CommentStore, LikeStore, Page, ProfileStore, RankingStore, RatingStore, StoreResult,
    TradeStore,
};

#[derive(Default)]
struct State {
    trades: Vec<TradeRecord>,
    ratings: Vec<RatingRecord>,
    likes: Vec<LikeRecord>,
    comments: Vec<CommentRecord>,
    profiles: Vec<ProfileRecord>,
    rankings: Vec<UserRanking>,
    stats: HashMap<Uuid, UserStats>,
}

/// In-memory implementation of every store capability.
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<State>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Seeds a profile and returns its id.
    pub fn add_profile(&self, username: &str) -> Uuid {
        let now = Utc::now();
        let profile = ProfileRecord {
            id: Uuid::new_v4(),
            username: username.to_string(),
            avatar_url: None,
            bio: None,
            created_at: now,
            updated_at: now,
        };
        let id = profile.id;
        self.state().profiles.push(profile);
        id
    }

    /// Replaces the leaderboard rows returned by `top_rankings`.
    pub fn set_rankings(&self, rankings: Vec<UserRanking>) {
        self.state().rankings = rankings;
    }

    /// Sets the external stats row for a user.
    pub fn set_user_stats(&self, stats: UserStats) {
        self.state().stats.insert(stats.user_id, stats);
    }
}

fn page_window<T>(rows: impl DoubleEndedIterator<Item = T>, page: Page) -> Vec<T> {
    rows.rev()
        .skip(page.offset.max(0) as usize)
        .take(page.limit.max(0) as usize)
        .collect()
}

#[async_trait]
impl TradeStore for MemoryStore {
    async fn insert_trade(&self, owner_id: Uuid, trade: &NewTrade) -> StoreResult<TradeRecord> {
        let now = Utc::now();
        let record = TradeRecord {
            id: Uuid::new_v4(),
            owner_id,
            asset_pair: trade.asset_pair.clone(),
            trade_type: trade.trade_type.as_str().to_string(),
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            position_size: trade.position_size,
            pnl_percentage: None,
            strategy: trade.strategy.as_str().to_string(),
            notes: trade.notes.clone(),
            status: trade.status.clone(),
            trade_date: trade.trade_date,
            created_at: now,
            updated_at: now,
        };
        self.state().trades.push(record.clone());
        Ok(record)
    }

    async fn trade_by_id(&self, trade_id: Uuid) -> StoreResult<Option<TradeRecord>> {
        Ok(self
            .state()
            .trades
            .iter()
            .find(|trade| trade.id == trade_id)
            .cloned())
    }

    async fn trades_page(&self, page: Page) -> StoreResult<Vec<TradeRecord>> {
        let state = self.state();
        Ok(page_window(state.trades.iter().cloned(), page))
    }

    async fn trades_for_user(&self, owner_id: Uuid, page: Page) -> StoreResult<Vec<TradeRecord>> {
        let state = self.state();
        Ok(page_window(
            state
                .trades
                .iter()
                .filter(|trade| trade.owner_id == owner_id)
                .cloned()
                .collect::<Vec<_>>()
                .into_iter(),
            page,
        ))
    }

    async fn update_trade(
        &self,
        trade_id: Uuid,
        owner_id: Uuid,
        trade: &NewTrade,
    ) -> StoreResult<TradeRecord> {
        let mut state = self.state();
        let record = state
            .trades
            .iter_mut()
            .find(|row| row.id == trade_id && row.owner_id == owner_id)
            .ok_or(StoreError::NotFound)?;

        record.asset_pair = trade.asset_pair.clone();
        record.trade_type = trade.trade_type.as_str().to_string();
        record.entry_price = trade.entry_price;
        record.exit_price = trade.exit_price;
        record.position_size = trade.position_size;
        record.strategy = trade.strategy.as_str().to_string();
        record.notes = trade.notes.clone();
        record.status = trade.status.clone();
        record.trade_date = trade.trade_date;
        record.updated_at = Utc::now();

        Ok(record.clone())
    }

    async fn delete_trade(&self, trade_id: Uuid, owner_id: Uuid) -> StoreResult<()> {
        let mut state = self.state();
        let before = state.trades.len();
        state
            .trades
            .retain(|row| !(row.id == trade_id && row.owner_id == owner_id));
        if state.trades.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl RatingStore for MemoryStore {
    async fn insert_rating(&self, rating: &NewRating) -> StoreResult<RatingRecord> {
        let mut state = self.state();
        let exists = state
            .ratings
            .iter()
            .any(|row| row.trade_id == rating.trade_id && row.rater_id == rating.rater_id);
        if exists {
            return Err(StoreError::UniqueViolation);
        }
        let record = RatingRecord {
            id: Uuid::new_v4(),
            trade_id: rating.trade_id,
            rater_id: rating.rater_id,
            rating: rating.rating,
            created_at: Utc::now(),
        };
        state.ratings.push(record.clone());
        Ok(record)
    }

    async fn update_rating(
        &self,
        rating_id: Uuid,
        rater_id: Uuid,
        rating: i16,
    ) -> StoreResult<RatingRecord> {
        let mut state = self.state();
        let record = state
            .ratings
            .iter_mut()
            .find(|row| row.id == rating_id && row.rater_id == rater_id)
            .ok_or(StoreError::NotFound)?;
        record.rating = rating;
        Ok(record.clone())
    }

    async fn delete_rating(&self, rating_id: Uuid, rater_id: Uuid) -> StoreResult<()> {
        let mut state = self.state();
        let before = state.ratings.len();
        state
            .ratings
            .retain(|row| !(row.id == rating_id && row.rater_id == rater_id));
        if state.ratings.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn upsert_rating(&self, rating: &NewRating) -> StoreResult<RatingRecord> {
        let mut state = self.state();
        if let Some(record) = state
            .ratings
            .iter_mut()
            .find(|row| row.trade_id == rating.trade_id && row.rater_id == rating.rater_id)
        {
            record.rating = rating.rating;
            return Ok(record.clone());
        }
        let record = RatingRecord {
            id: Uuid::new_v4(),
            trade_id: rating.trade_id,
            rater_id: rating.rater_id,
            rating: rating.rating,
            created_at: Utc::now(),
        };
        state.ratings.push(record.clone());
        Ok(record)
    }

    async fn rating_by_pair(
        &self,
        trade_id: Uuid,
        rater_id: Uuid,
    ) -> StoreResult<Option<RatingRecord>> {
        Ok(self
            .state()
            .ratings
            .iter()
            .find(|row| row.trade_id == trade_id && row.rater_id == rater_id)
            .cloned())
    }

    async fn rating_aggregates(&self, trade_ids: &[Uuid]) -> StoreResult<Vec<RatingAggregateRow>> {
        let state = self.state();
        let mut grouped: HashMap<Uuid, (i64, i64)> = HashMap::new();
        for row in state
            .ratings
            .iter()
            .filter(|row| trade_ids.contains(&row.trade_id))
        {
            let entry = grouped.entry(row.trade_id).or_insert((0, 0));
            entry.0 += i64::from(row.rating);
            entry.1 += 1;
        }
        Ok(grouped
            .into_iter()
            .map(|(trade_id, (sum, count))| RatingAggregateRow {
                trade_id,
                average_rating: sum as f64 / count as f64,
                total_ratings: count,
            })
            .collect())
    }
}

#[async_trait]
impl LikeStore for MemoryStore {
    async fn insert_like(&self, trade_id: Uuid, user_id: Uuid) -> StoreResult<LikeRecord> {
        let mut state = self.state();
        let exists = state
            .likes
            .iter()
            .any(|row| row.trade_id == trade_id && row.user_id == user_id);
        if exists {
            return Err(StoreError::UniqueViolation);
        }
        let record = LikeRecord {
            id: Uuid::new_v4(),
            trade_id,
            user_id,
        };
        state.likes.push(record);
        Ok(record)
    }

    async fn delete_like(&self, trade_id: Uuid, user_id: Uuid) -> StoreResult<()> {
        let mut state = self.state();
        let before = state.likes.len();
        state
            .likes
            .retain(|row| !(row.trade_id == trade_id && row.user_id == user_id));
        if state.likes.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn like_by_pair(&self, trade_id: Uuid, user_id: Uuid) -> StoreResult<Option<LikeRecord>> {
        Ok(self
            .state()
            .likes
            .iter()
            .find(|row| row.trade_id == trade_id && row.user_id == user_id)
            .copied())
    }

    async fn like_counts(&self, trade_ids: &[Uuid]) -> StoreResult<Vec<LikeCountRow>> {
        let state = self.state();
        let mut grouped: HashMap<Uuid, i64> = HashMap::new();
        for row in state
            .likes
            .iter()
            .filter(|row| trade_ids.contains(&row.trade_id))
        {
            *grouped.entry(row.trade_id).or_insert(0) += 1;
        }
        Ok(grouped
            .into_iter()
            .map(|(trade_id, like_count)| LikeCountRow {
                trade_id,
                like_count,
            })
            .collect())
    }
}

#[async_trait]
impl CommentStore for MemoryStore {
    async fn insert_comment(
        &self,
        trade_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> StoreResult<CommentRecord> {
        let record = CommentRecord {
            id: Uuid::new_v4(),
            trade_id,
            user_id,
            content: content.to_string(),
            created_at: Utc::now(),
        };
        self.state().comments.push(record.clone());
        Ok(record)
    }

    async fn delete_comment(&self, comment_id: Uuid, user_id: Uuid) -> StoreResult<()> {
        let mut state = self.state();
        let before = state.comments.len();
        state
            .comments
            .retain(|row| !(row.id == comment_id && row.user_id == user_id));
        if state.comments.len() == before {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }

    async fn comments_for_trade(&self, trade_id: Uuid) -> StoreResult<Vec<CommentWithAuthor>> {
        let state = self.state();
        Ok(state
            .comments
            .iter()
            .filter(|row| row.trade_id == trade_id)
            .map(|row| {
                let author = state.profiles.iter().find(|p| p.id == row.user_id);
                CommentWithAuthor {
                    comment: row.clone(),
                    username: author
                        .map_or_else(|| "Unknown".to_string(), |p| p.username.clone()),
                    avatar_url: author.and_then(|p| p.avatar_url.clone()),
                }
            })
            .collect())
    }
}

#[async_trait]
impl ProfileStore for MemoryStore {
    async fn profile_by_id(&self, user_id: Uuid) -> StoreResult<Option<ProfileRecord>> {
        Ok(self
            .state()
            .profiles
            .iter()
            .find(|row| row.id == user_id)
            .cloned())
    }

    async fn profile_by_username(&self, username: &str) -> StoreResult<Option<ProfileRecord>> {
        Ok(self
            .state()
            .profiles
            .iter()
            .find(|row| row.username == username)
            .cloned())
    }

    async fn profiles_by_ids(&self, user_ids: &[Uuid]) -> StoreResult<Vec<ProfileRecord>> {
        Ok(self
            .state()
            .profiles
            .iter()
            .filter(|row| user_ids.contains(&row.id))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl RankingStore for MemoryStore {
    async fn top_rankings(&self, limit: i64) -> StoreResult<Vec<UserRanking>> {
        Ok(self
            .state()
            .rankings
            .iter()
            .take(limit.max(0) as usize)
            .cloned()
            .collect())
    }

    async fn user_stats(&self, user_id: Uuid) -> StoreResult<Option<UserStats>> {
        Ok(self.state().stats.get(&user_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use trade_social_core::types::{Strategy, TradeType};

    fn sample_new_trade() -> NewTrade {
        NewTrade {
            asset_pair: "BTC/USDT".to_string(),
            trade_type: TradeType::Long,
            entry_price: dec!(100),
            exit_price: None,
            position_size: None,
            strategy: Strategy::Scalp,
            notes: None,
            status: "Open".to_string(),
            trade_date: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_rating_enforces_pair_uniqueness() {
        let store = MemoryStore::new();
        let rating = NewRating {
            trade_id: Uuid::new_v4(),
            rater_id: Uuid::new_v4(),
            rating: 4,
        };

        store.insert_rating(&rating).await.unwrap();
        assert_eq!(
            store.insert_rating(&rating).await,
            Err(StoreError::UniqueViolation)
        );
    }

    #[tokio::test]
    async fn upsert_rating_replaces_in_place() {
        let store = MemoryStore::new();
        let trade_id = Uuid::new_v4();
        let rater_id = Uuid::new_v4();

        let first = store
            .upsert_rating(&NewRating {
                trade_id,
                rater_id,
                rating: 2,
            })
            .await
            .unwrap();
        let second = store
            .upsert_rating(&NewRating {
                trade_id,
                rater_id,
                rating: 5,
            })
            .await
            .unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(second.rating, 5);
        let aggregates = store.rating_aggregates(&[trade_id]).await.unwrap();
        assert_eq!(aggregates.len(), 1);
        assert_eq!(aggregates[0].total_ratings, 1);
    }

    #[tokio::test]
    async fn scoped_mutations_mask_other_owners() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let trade = store
            .insert_trade(owner, &sample_new_trade())
            .await
            .unwrap();

        assert_eq!(
            store.delete_trade(trade.id, stranger).await,
            Err(StoreError::NotFound)
        );
        assert!(store.delete_trade(trade.id, owner).await.is_ok());
    }

    #[tokio::test]
    async fn insert_like_enforces_pair_uniqueness() {
        let store = MemoryStore::new();
        let trade_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();

        store.insert_like(trade_id, user_id).await.unwrap();
        assert_eq!(
            store.insert_like(trade_id, user_id).await,
            Err(StoreError::UniqueViolation)
        );
        assert!(store.delete_like(trade_id, user_id).await.is_ok());
        assert_eq!(
            store.delete_like(trade_id, user_id).await,
            Err(StoreError::NotFound)
        );
    }

    #[tokio::test]
    async fn trades_page_is_newest_first() {
        let store = MemoryStore::new();
        let owner = Uuid::new_v4();
        let mut draft = sample_new_trade();
        draft.asset_pair = "first".to_string();
        store.insert_trade(owner, &draft).await.unwrap();
        draft.asset_pair = "second".to_string();
        store.insert_trade(owner, &draft).await.unwrap();

        let page = store
            .trades_page(Page {
                limit: 10,
                offset: 0,
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 2);
        assert_eq!(page[0].asset_pair, "second");
        assert_eq!(page[1].asset_pair, "first");

        let rest = store
            .trades_page(Page {
                limit: 10,
                offset: 1,
            })
            .await
            .unwrap();
        assert_eq!(rest.len(), 1);
        assert_eq!(rest[0].asset_pair, "first");
    }

    #[tokio::test]
    async fn comments_join_author_or_unknown() {
        let store = MemoryStore::new();
        let author = store.add_profile("trader_joe");
        let ghost = Uuid::new_v4();
        let trade_id = Uuid::new_v4();

        store
            .insert_comment(trade_id, author, "nice entry")
            .await
            .unwrap();
        store
            .insert_comment(trade_id, ghost, "who am I")
            .await
            .unwrap();

        let comments = store.comments_for_trade(trade_id).await.unwrap();
        assert_eq!(comments.len(), 2);
        assert_eq!(comments[0].username, "trader_joe");
        assert_eq!(comments[1].username, "Unknown");
    }

    #[tokio::test]
    async fn rating_aggregates_only_cover_requested_ids() {
        let store = MemoryStore::new();
        let trade_a = Uuid::new_v4();
        let trade_b = Uuid::new_v4();
        for (trade_id, rating) in [(trade_a, 5), (trade_a, 3), (trade_b, 1)] {
            store
                .insert_rating(&NewRating {
                    trade_id,
                    rater_id: Uuid::new_v4(),
                    rating,
                })
                .await
                .unwrap();
        }

        let rows = store.rating_aggregates(&[trade_a]).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].trade_id, trade_a);
        assert_eq!(rows[0].total_ratings, 2);
        assert!((rows[0].average_rating - 4.0).abs() < f64::EPSILON);
    }
}
