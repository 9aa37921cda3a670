//! `PostgreSQL` store adapter.
//!
//! One repository per table, each implementing its store capability over a
//! shared pool. Ownership-scoped mutations put the acting user id in the
//! WHERE clause, so a non-owned row and a missing row both come back as
//! zero rows affected.

pub mod comment_repo;
pub mod like_repo;
pub mod profile_repo;
pub mod ranking_repo;
pub mod rating_repo;
pub mod trade_repo;

pub use comment_repo::CommentRepository;
pub use like_repo::LikeRepository;
pub use profile_repo::ProfileRepository;
pub use ranking_repo::RankingRepository;
pub use rating_repo::RatingRepository;
pub use trade_repo::TradeRepository;

use sqlx::PgPool;

use trade_social_core::error::StoreError;

/// All repositories constructed from a single database pool.
pub struct Repositories {
    pub trades: TradeRepository,
    pub ratings: RatingRepository,
    pub likes: LikeRepository,
    pub comments: CommentRepository,
    pub profiles: ProfileRepository,
    pub rankings: RankingRepository,
}

impl Repositories {
    /// Creates a new set of repositories from a database pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            trades: TradeRepository::new(pool.clone()),
            ratings: RatingRepository::new(pool.clone()),
            likes: LikeRepository::new(pool.clone()),
            comments: CommentRepository::new(pool.clone()),
            profiles: ProfileRepository::new(pool.clone()),
            rankings: RankingRepository::new(pool),
        }
    }
}

/// SQLSTATE for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Translates a sqlx failure into the store error taxonomy.
pub(crate) fn map_sqlx(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::Database(db) if db.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            StoreError::UniqueViolation
        }
        _ => StoreError::Unavailable(err.to_string()),
    }
}
