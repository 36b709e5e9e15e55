//! Shared test helpers for integration tests.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use opslog_api::state::AppState;
use opslog_core::config::AppConfig;
use opslog_database::repositories::log::LogRepository;
use opslog_store::JobConfigStore;

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    // Holds the config store directory alive for the test's duration.
    _store_dir: tempfile::TempDir,
}

/// Decoded response from a test request
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// JSON body (Null when the body was empty or not JSON)
    pub body: Value,
}

impl TestApp {
    /// Create a new test application over an in-memory log database and a
    /// temp-directory config store.
    pub async fn new() -> Self {
        let store_dir = tempfile::tempdir().expect("Failed to create temp dir");

        let mut config = AppConfig::default();
        config.database.path = ":memory:".to_string();
        config.store.path = store_dir
            .path()
            .join("configs.json")
            .to_string_lossy()
            .into_owned();

        let pool = opslog_database::connection::create_pool(&config.database)
            .await
            .expect("Failed to open test database");
        opslog_database::schema::init_schema(&pool)
            .await
            .expect("Failed to initialize schema");

        let log_repo = Arc::new(LogRepository::new(pool));
        let config_store = Arc::new(JobConfigStore::new(&config.store.path));

        let state = AppState {
            config: Arc::new(config),
            log_repo,
            config_store,
        };

        Self {
            router: opslog_api::build_app(state),
            _store_dir: store_dir,
        }
    }

    /// Issue a request against the in-process router.
    pub async fn request(&self, method: &str, path: &str, body: Option<Value>) -> TestResponse {
        let builder = Request::builder().method(method).uri(path);

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string()))
                .expect("Failed to build request"),
            None => builder.body(Body::empty()).expect("Failed to build request"),
        };

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        TestResponse { status, body }
    }

    /// Insert a log entry directly through the API and return it.
    pub async fn create_log(&self, log_type: &str, input: &str, size: i64, check: bool) -> Value {
        let response = self
            .request(
                "POST",
                "/api/logs",
                Some(serde_json::json!({
                    "type": log_type,
                    "input": input,
                    "output": format!("{input}.out"),
                    "info": "processed",
                    "size": size,
                    "check": check,
                })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.body
    }
}
