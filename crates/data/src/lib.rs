//! Store capabilities and adapters for the trade reputation engine.
//!
//! This crate provides:
//! - Data models for trades, ratings, likes, comments, and profiles
//! - Store capability traits the engines are written against
//! - A `PostgreSQL` adapter (one repository per table)
//! - An in-memory store for tests and offline development

pub mod database;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod store;

// Re-export models
pub use models::{
    CommentRecord, CommentWithAuthor, LikeCountRow, LikeRecord, NewRating, ProfileRecord,
    RatingAggregateRow, RatingRecord, TradeRecord, TradeStats, TradeWithStats, UserRanking,
    UserStats,
};

// Re-export store surface
pub use memory::MemoryStore;
pub use postgres::{
    CommentRepository, LikeRepository, ProfileRepository, RankingRepository, RatingRepository,
    Repositories, TradeRepository,
};
pub use store::{
    CommentStore, LikeStore, Page, ProfileStore, RankingStore, RatingStore, StoreResult,
    TradeStore,
};
