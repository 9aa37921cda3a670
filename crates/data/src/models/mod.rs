//! Data models for the trade reputation engine.
//!
//! Prices and sizes use `rust_decimal::Decimal`; recomputed averages and
//! pass-through scores are `f64`. Records derive `sqlx::FromRow` for
//! database compatibility.

pub mod comment;
pub mod like;
pub mod profile;
pub mod rating;
pub mod stats;
pub mod trade;

pub use comment::{CommentRecord, CommentWithAuthor};
pub use like::{LikeCountRow, LikeRecord};
pub use profile::ProfileRecord;
pub use rating::{NewRating, RatingAggregateRow, RatingRecord};
pub use stats::{TradeStats, UserRanking, UserStats};
pub use trade::{TradeRecord, TradeWithStats};
