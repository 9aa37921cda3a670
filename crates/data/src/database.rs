use anyhow::Result;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tracing::info;

use trade_social_core::config::DatabaseConfig;

/// Connects a pool to the configured `PostgreSQL` database.
///
/// # Errors
/// Returns an error if the database connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;
    info!(max_connections = config.max_connections, "database pool connected");
    Ok(pool)
}
