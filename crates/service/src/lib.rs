//! Engines for the trade-and-reputation consistency layer.
//!
//! Each engine gates mutations on the identity capability and reaches the
//! store only through the capability traits in `trade-social-data`, so the
//! same code runs against `PostgreSQL` and the in-memory store. Every
//! operation is one logical write; there is nothing to roll back.

pub mod aggregation;
pub mod comments;
pub mod likes;
pub mod rankings;
pub mod ratings;
pub mod trades;

pub use aggregation::AggregationReader;
pub use comments::CommentGuard;
pub use likes::{LikeState, LikeToggle};
pub use rankings::RankingReader;
pub use ratings::RatingEngine;
pub use trades::TradeService;
