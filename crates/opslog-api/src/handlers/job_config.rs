//! Job configuration handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use opslog_entity::job::{JobConfig, JobConfigPatch, NewJobConfig};

use crate::dto::MessageResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// GET /api/configs
pub async fn list_configs(
    State(state): State<AppState>,
) -> Result<Json<Vec<JobConfig>>, ApiError> {
    let configs = state.config_store.load_all().await?;
    Ok(Json(configs))
}

/// POST /api/configs
pub async fn create_config(
    State(state): State<AppState>,
    Json(new): Json<NewJobConfig>,
) -> Result<(StatusCode, Json<JobConfig>), ApiError> {
    let config = state.config_store.create(new).await?;
    Ok((StatusCode::CREATED, Json(config)))
}

/// PUT /api/configs/{id}
///
/// The body is optional: a request without one is treated as an empty
/// patch, which the store rejects as a validation error rather than
/// surfacing an extractor rejection.
pub async fn update_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    patch: Option<Json<JobConfigPatch>>,
) -> Result<Json<MessageResponse>, ApiError> {
    let patch = patch.map(|Json(p)| p).unwrap_or_default();
    state.config_store.update(id, patch).await?;
    Ok(Json(MessageResponse::new("Config updated successfully")))
}

/// DELETE /api/configs/{id}
pub async fn delete_config(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.config_store.delete(id).await?;
    Ok(Json(MessageResponse::new("Config deleted successfully")))
}
