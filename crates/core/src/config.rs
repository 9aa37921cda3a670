use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub feed: FeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Read-side paging limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Maximum trades per feed or profile page.
    pub page_size: u32,
    /// Maximum rows returned from the leaderboard.
    pub ranking_limit: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: DatabaseConfig {
                url: "postgresql://localhost/trade_social".to_string(),
                max_connections: 10,
            },
            feed: FeedConfig {
                page_size: 50,
                ranking_limit: 100,
            },
        }
    }
}
