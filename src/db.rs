use anyhow::Result;
use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::config::DbConfig;

pub type DbPool = PgPool;

/// Create the Postgres connection pool.
pub async fn create_pool(database_url: &str, config: &DbConfig) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .idle_timeout(config.max_idle_time)
        .acquire_timeout(config.query_timeout)
        .connect(database_url)
        .await?;
    Ok(pool)
}

/// Apply the SQL files bundled under `migrations/`.
pub async fn run_migrations(pool: &DbPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
