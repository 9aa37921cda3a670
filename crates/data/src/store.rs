//! Store capability traits.
//!
//! The engines are written against these seams; the Postgres adapter and the
//! in-memory store both implement them. Every method maps to one logical
//! read or write, and ownership-scoped mutations take the acting user id as
//! part of the predicate.

use async_trait::async_trait;
use uuid::Uuid;

use trade_social_core::error::StoreError;
use trade_social_core::validation::NewTrade;

use crate::models::{
    CommentRecord, CommentWithAuthor, LikeCountRow, LikeRecord, NewRating, ProfileRecord,
    RatingAggregateRow, RatingRecord, TradeRecord, UserRanking, UserStats,
};

pub type StoreResult<T> = Result<T, StoreError>;

/// Window into a list read.
#[derive(Debug, Clone, Copy)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

#[async_trait]
pub trait TradeStore: Send + Sync {
    /// Inserts a validated trade owned by `owner_id` and returns the stored
    /// row.
    async fn insert_trade(&self, owner_id: Uuid, trade: &NewTrade) -> StoreResult<TradeRecord>;

    async fn trade_by_id(&self, trade_id: Uuid) -> StoreResult<Option<TradeRecord>>;

    /// Newest-first page over all trades.
    async fn trades_page(&self, page: Page) -> StoreResult<Vec<TradeRecord>>;

    /// Newest-first page over one user's trades.
    async fn trades_for_user(&self, owner_id: Uuid, page: Page) -> StoreResult<Vec<TradeRecord>>;

    /// Owner-scoped replacement of the mutable trade fields. `NotFound`
    /// when the id does not exist or belongs to someone else.
    async fn update_trade(
        &self,
        trade_id: Uuid,
        owner_id: Uuid,
        trade: &NewTrade,
    ) -> StoreResult<TradeRecord>;

    /// Owner-scoped delete with the same masking.
    async fn delete_trade(&self, trade_id: Uuid, owner_id: Uuid) -> StoreResult<()>;
}

#[async_trait]
pub trait RatingStore: Send + Sync {
    /// Inserts a rating; `UniqueViolation` when the pair already rated.
    async fn insert_rating(&self, rating: &NewRating) -> StoreResult<RatingRecord>;

    /// Rater-scoped value update.
    async fn update_rating(
        &self,
        rating_id: Uuid,
        rater_id: Uuid,
        rating: i16,
    ) -> StoreResult<RatingRecord>;

    /// Rater-scoped delete.
    async fn delete_rating(&self, rating_id: Uuid, rater_id: Uuid) -> StoreResult<()>;

    /// Creates or replaces the pair's rating in one write.
    async fn upsert_rating(&self, rating: &NewRating) -> StoreResult<RatingRecord>;

    async fn rating_by_pair(
        &self,
        trade_id: Uuid,
        rater_id: Uuid,
    ) -> StoreResult<Option<RatingRecord>>;

    /// Grouped `(average, count)` per trade id; trades with no ratings are
    /// absent from the result.
    async fn rating_aggregates(&self, trade_ids: &[Uuid]) -> StoreResult<Vec<RatingAggregateRow>>;
}

#[async_trait]
pub trait LikeStore: Send + Sync {
    /// Inserts a like; `UniqueViolation` when the pair already exists.
    async fn insert_like(&self, trade_id: Uuid, user_id: Uuid) -> StoreResult<LikeRecord>;

    /// Deletes the pair's like; `NotFound` when there is none.
    async fn delete_like(&self, trade_id: Uuid, user_id: Uuid) -> StoreResult<()>;

    async fn like_by_pair(&self, trade_id: Uuid, user_id: Uuid) -> StoreResult<Option<LikeRecord>>;

    /// Grouped like count per trade id; unliked trades are absent.
    async fn like_counts(&self, trade_ids: &[Uuid]) -> StoreResult<Vec<LikeCountRow>>;
}

#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn insert_comment(
        &self,
        trade_id: Uuid,
        user_id: Uuid,
        content: &str,
    ) -> StoreResult<CommentRecord>;

    /// Author-scoped delete.
    async fn delete_comment(&self, comment_id: Uuid, user_id: Uuid) -> StoreResult<()>;

    /// Comments for a trade in creation order, joined with their authors.
    async fn comments_for_trade(&self, trade_id: Uuid) -> StoreResult<Vec<CommentWithAuthor>>;
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn profile_by_id(&self, user_id: Uuid) -> StoreResult<Option<ProfileRecord>>;

    async fn profile_by_username(&self, username: &str) -> StoreResult<Option<ProfileRecord>>;

    /// Profiles for an id set; missing ids are simply absent.
    async fn profiles_by_ids(&self, user_ids: &[Uuid]) -> StoreResult<Vec<ProfileRecord>>;
}

#[async_trait]
pub trait RankingStore: Send + Sync {
    /// Top leaderboard rows, already ordered by the external aggregate.
    async fn top_rankings(&self, limit: i64) -> StoreResult<Vec<UserRanking>>;

    /// The external per-user aggregate, `None` when the user has no row.
    async fn user_stats(&self, user_id: Uuid) -> StoreResult<Option<UserStats>>;
}
