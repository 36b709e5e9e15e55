//! Route definitions for the OpsLog HTTP API.
//!
//! All routes are organized by domain and mounted under `/api`. The
//! router receives `AppState` and passes it to all handlers via Axum's
//! `State` extractor.

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, post, put},
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(log_routes())
        .merge(config_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Operation log endpoints.
fn log_routes() -> Router<AppState> {
    Router::new()
        .route("/logs", post(handlers::log::create_log))
        .route("/logs", get(handlers::log::list_logs))
        .route("/logs/{id}", delete(handlers::log::delete_log))
}

/// Job configuration endpoints.
fn config_routes() -> Router<AppState> {
    Router::new()
        .route("/configs", get(handlers::job_config::list_configs))
        .route("/configs", post(handlers::job_config::create_config))
        .route("/configs/{id}", put(handlers::job_config::update_config))
        .route("/configs/{id}", delete(handlers::job_config::delete_config))
}

/// Health check endpoint.
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health_check))
}
