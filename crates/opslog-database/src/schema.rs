//! Log table schema initialization.

use sqlx::SqlitePool;
use tracing::info;

use opslog_core::error::{AppError, ErrorKind};

const CREATE_LOGS_TABLE: &str = "\
CREATE TABLE IF NOT EXISTS Logs (
    ID INTEGER PRIMARY KEY AUTOINCREMENT,
    Datetime TEXT NOT NULL,
    Type TEXT NOT NULL,
    Input TEXT NOT NULL,
    Output TEXT NOT NULL,
    Info TEXT NOT NULL,
    Size INTEGER NOT NULL,
    Success INTEGER NOT NULL
)";

/// Ensure the `Logs` table exists. Idempotent; safe to run at every
/// process start. `AUTOINCREMENT` guarantees ids are never reused after
/// deletion.
pub async fn init_schema(pool: &SqlitePool) -> Result<(), AppError> {
    sqlx::query(CREATE_LOGS_TABLE)
        .execute(pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                format!("Failed to initialize schema: {e}"),
                e,
            )
        })?;

    info!("Log schema initialized");
    Ok(())
}
