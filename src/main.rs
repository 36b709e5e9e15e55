//! OpsLog Server — backend for the file-processing tool.
//!
//! Main entry point that wires all crates together and starts the server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use opslog_api::state::AppState;
use opslog_core::config::AppConfig;
use opslog_core::error::AppError;
use opslog_database::repositories::log::LogRepository;
use opslog_store::JobConfigStore;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment.
fn load_configuration() -> Result<AppConfig, AppError> {
    let env = std::env::var("OPSLOG_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main server run function.
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting OpsLog v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Create data directories ──────────────────────────
    create_data_directories(&config).await?;

    // ── Step 2: Optional boot-time log reset ─────────────────────
    if config.database.reset_on_start {
        reset_database(&config).await?;
    }

    // ── Step 3: Database pool + schema ───────────────────────────
    let db_pool = opslog_database::connection::create_pool(&config.database).await?;
    opslog_database::schema::init_schema(&db_pool).await?;

    // ── Step 4: Repositories ─────────────────────────────────────
    let log_repo = Arc::new(LogRepository::new(db_pool.clone()));
    let config_store = Arc::new(JobConfigStore::new(&config.store.path));

    // ── Step 5: HTTP server ──────────────────────────────────────
    let state = AppState {
        config: Arc::new(config),
        log_repo,
        config_store,
    };

    opslog_api::run_server(state).await
}

/// Ensure the parent directories of both stores exist.
async fn create_data_directories(config: &AppConfig) -> Result<(), AppError> {
    for path in [&config.database.path, &config.store.path] {
        if path == ":memory:" {
            continue;
        }
        if let Some(parent) = std::path::Path::new(path).parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await.map_err(|e| {
                    AppError::internal(format!(
                        "Failed to create dir '{}': {e}",
                        parent.display()
                    ))
                })?;
            }
        }
    }
    Ok(())
}

/// Remove the previous log database so this run starts with an empty log.
async fn reset_database(config: &AppConfig) -> Result<(), AppError> {
    match tokio::fs::remove_file(&config.database.path).await {
        Ok(()) => {
            tracing::info!(path = %config.database.path, "Removed previous log database");
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(AppError::internal(format!(
            "Failed to remove '{}': {e}",
            config.database.path
        ))),
    }
}
