//! Database connection and pool management
//!
//! This module provides SQLite connection pooling, schema migrations and
//! the write-result type shared by the repositories.

use anyhow::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteQueryResult};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

/// Database configuration for pool creation
pub struct DbConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
    pub busy_timeout_secs: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 30,
            idle_timeout_secs: 600,      // 10 minutes
            max_lifetime_secs: 1800,     // 30 minutes
            busy_timeout_secs: 5,
        }
    }
}

/// Outcome of a mutating statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteOutcome {
    /// Row id generated by the statement; only meaningful after an INSERT
    pub last_insert_id: Option<i64>,
    pub rows_affected: u64,
}

impl From<SqliteQueryResult> for WriteOutcome {
    fn from(result: SqliteQueryResult) -> Self {
        let rows_affected = result.rows_affected();
        let last_insert_id = Some(result.last_insert_rowid())
            .filter(|id| rows_affected > 0 && *id > 0);

        Self {
            last_insert_id,
            rows_affected,
        }
    }
}

/// Whether a URL names an in-memory SQLite database
pub fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

/// Create a SQLite connection pool
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<SqlitePool> {
    let config = DbConfig {
        url: database_url.to_string(),
        max_connections,
        ..Default::default()
    };
    create_pool_with_config(&config).await
}

/// Create a SQLite connection pool with custom configuration
///
/// An in-memory database only exists while its connection is open, so such
/// pools are pinned to one connection that is never recycled.
pub async fn create_pool_with_config(config: &DbConfig) -> Result<SqlitePool> {
    let connect_options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .busy_timeout(Duration::from_secs(config.busy_timeout_secs));

    let options = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .test_before_acquire(true);

    let in_memory = is_in_memory(&config.url);
    let options = if in_memory {
        options
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None::<Duration>)
            .max_lifetime(None::<Duration>)
    } else {
        options
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
    };

    let pool = options.connect_with(connect_options).await?;

    info!(
        in_memory,
        max_connections = if in_memory { 1 } else { config.max_connections },
        "Database pool created"
    );

    Ok(pool)
}

/// Create a migrated, private in-memory database
pub async fn create_memory_pool() -> Result<SqlitePool> {
    let pool = create_pool("sqlite::memory:", 1).await?;
    run_migrations(&pool).await?;
    Ok(pool)
}

/// Run database migrations
pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    info!("Running database migrations...");
    sqlx::migrate!("./migrations").run(pool).await?;
    info!("Database migrations completed successfully");
    Ok(())
}

/// Check database health
pub async fn health_check(pool: &SqlitePool) -> Result<()> {
    sqlx::query("SELECT 1")
        .execute(pool)
        .await
        .map(|_| ())
        .map_err(|e| {
            warn!("Database health check failed: {}", e);
            e.into()
        })
}
