//! Database connection pool management

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time;
use tracing::{error, info, warn};

use crate::config::Config;

fn pool_options(config: &Config) -> PgPoolOptions {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
}

/// Create a PostgreSQL connection pool and open the first connection
pub async fn create_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    info!("Connecting to PostgreSQL...");

    let pool = pool_options(config).connect(&config.database_url).await?;

    info!(
        "PostgreSQL pool ready (max {} connections)",
        config.db_max_connections
    );

    Ok(pool)
}

/// Pool that connects on first use. Lets the HTTP layer run without a live database.
pub fn create_lazy_pool(config: &Config) -> Result<PgPool, sqlx::Error> {
    pool_options(config).connect_lazy(&config.database_url)
}

/// Apply the embedded migrations (analyses + messages tables)
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Longest pause between migration attempts
const MAX_MIGRATION_BACKOFF: Duration = Duration::from_secs(60);

/// Delay before the next migration attempt: doubles up to `MAX_MIGRATION_BACKOFF`
pub fn next_backoff(current: Duration) -> Duration {
    (current * 2).min(MAX_MIGRATION_BACKOFF)
}

/// Retry migrations until they succeed, then raise `schema_ready`
///
/// Spawned with `tokio::spawn` when the database was unreachable at startup.
pub async fn migrate_until_ready(
    pool: PgPool,
    schema_ready: Arc<AtomicBool>,
    initial_backoff: Duration,
) {
    let mut backoff = initial_backoff;

    loop {
        time::sleep(backoff).await;

        match run_migrations(&pool).await {
            Ok(()) => {
                schema_ready.store(true, Ordering::Release);
                info!("Database reachable again, migrations completed");
                return;
            }
            Err(e) => {
                backoff = next_backoff(backoff);
                warn!("Migrations still pending, retrying in {:?}: {}", backoff, e);
            }
        }
    }
}

/// Health check for the database
pub async fn health_check(pool: &PgPool) -> bool {
    match sqlx::query_scalar::<_, i32>("SELECT 1").fetch_one(pool).await {
        Ok(_) => true,
        Err(e) => {
            error!("Database health check failed: {}", e);
            false
        }
    }
}
