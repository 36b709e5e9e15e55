//! SQLite connection pool management.

use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use opslog_core::config::DatabaseConfig;
use opslog_core::error::{AppError, ErrorKind};

/// Path value selecting an in-memory database.
const MEMORY_PATH: &str = ":memory:";

/// Create a SQLite connection pool from configuration.
///
/// The database file is created when missing. An in-memory database is
/// pinned to a single pooled connection that never idles out, since each
/// SQLite memory connection is otherwise its own empty database.
pub async fn create_pool(config: &DatabaseConfig) -> Result<SqlitePool, AppError> {
    info!(path = %config.path, "Opening SQLite database");

    let in_memory = config.path == MEMORY_PATH;

    let options = if in_memory {
        SqliteConnectOptions::new().in_memory(true)
    } else {
        SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
    };

    let mut pool_options = SqlitePoolOptions::new()
        .acquire_timeout(Duration::from_secs(config.connect_timeout_seconds));

    pool_options = if in_memory {
        pool_options
            .min_connections(1)
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
    } else {
        pool_options.max_connections(config.max_connections)
    };

    let pool = pool_options.connect_with(options).await.map_err(|e| {
        AppError::with_source(
            ErrorKind::Database,
            format!("Failed to open database '{}': {e}", config.path),
            e,
        )
    })?;

    Ok(pool)
}

/// Check database connectivity.
pub async fn health_check(pool: &SqlitePool) -> Result<bool, AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|v| v == 1)
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Health check failed", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn memory_config() -> DatabaseConfig {
        DatabaseConfig {
            path: MEMORY_PATH.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn in_memory_pool_connects_and_answers() {
        let pool = create_pool(&memory_config()).await.unwrap();
        assert!(health_check(&pool).await.unwrap());
    }
}
