//! Application state shared across all handlers and middleware.

use std::sync::Arc;

use opslog_core::config::AppConfig;
use opslog_database::repositories::log::LogRepository;
use opslog_store::JobConfigStore;

/// Application state containing all shared dependencies.
///
/// Constructed once at process start and passed to every Axum handler via
/// `State<AppState>`. All fields are `Arc`-wrapped for cheap cloning
/// across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<AppConfig>,
    /// Log repository.
    pub log_repo: Arc<LogRepository>,
    /// Job configuration store.
    pub config_store: Arc<JobConfigStore>,
}
