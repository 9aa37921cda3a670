//! Leaderboard and per-user stat pass-through.
//!
//! The rank score formula lives in the store's aggregate; this side only
//! clamps the requested window and coalesces a missing stats row into the
//! zero-valued shape. Nothing is recomputed locally.

use std::sync::Arc;

use uuid::Uuid;

use trade_social_core::config::FeedConfig;
use trade_social_core::error::Error;
use trade_social_data::models::{UserRanking, UserStats};
use trade_social_data::store::RankingStore;

/// Reads the external ranking aggregates.
pub struct RankingReader {
    rankings: Arc<dyn RankingStore>,
    feed: FeedConfig,
}

impl RankingReader {
    #[must_use]
    pub fn new(rankings: Arc<dyn RankingStore>, feed: FeedConfig) -> Self {
        Self { rankings, feed }
    }

    /// Top leaderboard rows in the aggregate's own order.
    ///
    /// # Errors
    /// `Store` if the read fails.
    pub async fn top_users(&self, limit: i64) -> Result<Vec<UserRanking>, Error> {
        let limit = limit.clamp(1, i64::from(self.feed.ranking_limit));
        Ok(self.rankings.top_rankings(limit).await?)
    }

    /// The external per-user aggregate; a user with no row reads as the
    /// zero-valued shape rather than an error.
    ///
    /// # Errors
    /// `Store` if the read fails.
    pub async fn stats_for(&self, user_id: Uuid) -> Result<UserStats, Error> {
        let stats = self.rankings.user_stats(user_id).await?;
        Ok(stats.unwrap_or_else(|| UserStats::empty(user_id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trade_social_core::config::AppConfig;
    use trade_social_data::memory::MemoryStore;

    fn sample_ranking(username: &str, rank_score: f64) -> UserRanking {
        UserRanking {
            user_id: Uuid::new_v4(),
            username: username.to_string(),
            avatar_url: None,
            total_trades: 12,
            total_ratings: 30,
            average_rating: 4.2,
            rank_score,
            closed_trades: 9,
            average_pnl: 3.5,
        }
    }

    fn reader_for(store: &Arc<MemoryStore>) -> RankingReader {
        RankingReader::new(store.clone(), AppConfig::default().feed)
    }

    #[tokio::test]
    async fn top_users_passes_scores_through_unmodified() {
        let store = Arc::new(MemoryStore::new());
        store.set_rankings(vec![
            sample_ranking("trader_joe", 87.31),
            sample_ranking("critic", 12.5),
        ]);

        let rankings = reader_for(&store).top_users(10).await.unwrap();
        assert_eq!(rankings.len(), 2);
        // The order and the score are the aggregate's; neither is touched.
        assert_eq!(rankings[0].username, "trader_joe");
        assert!((rankings[0].rank_score - 87.31).abs() < f64::EPSILON);
        assert!((rankings[1].rank_score - 12.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn top_users_clamps_the_limit() {
        let store = Arc::new(MemoryStore::new());
        store.set_rankings((0..150).map(|i| sample_ranking(&format!("u{i}"), 0.0)).collect());

        let reader = reader_for(&store);
        assert_eq!(reader.top_users(1000).await.unwrap().len(), 100);
        assert_eq!(reader.top_users(-5).await.unwrap().len(), 1);
        assert_eq!(reader.top_users(3).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn missing_stats_coalesce_to_zero_shape() {
        let store = Arc::new(MemoryStore::new());
        let user_id = Uuid::new_v4();

        let stats = reader_for(&store).stats_for(user_id).await.unwrap();
        assert_eq!(stats.user_id, user_id);
        assert_eq!(stats.total_trades, 0);
        assert_eq!(stats.total_closed_trades, 0);
        assert!((stats.average_rating - 0.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn present_stats_pass_through() {
        let store = Arc::new(MemoryStore::new());
        let user_id = Uuid::new_v4();
        store.set_user_stats(UserStats {
            user_id,
            total_trades: 7,
            total_ratings: 21,
            average_rating: 4.1,
            total_closed_trades: 5,
            average_pnl: -1.2,
        });

        let stats = reader_for(&store).stats_for(user_id).await.unwrap();
        assert_eq!(stats.total_trades, 7);
        assert!((stats.average_pnl - -1.2).abs() < f64::EPSILON);
    }
}
