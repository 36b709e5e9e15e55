//! Operation log handlers.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;

use opslog_entity::log::{LogFilter, LogRecord, NewLogRecord, RawLogQuery, RawLogRecord};

use crate::dto::MessageResponse;
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/logs
pub async fn create_log(
    State(state): State<AppState>,
    Json(raw): Json<RawLogRecord>,
) -> Result<(StatusCode, Json<LogRecord>), ApiError> {
    let new = NewLogRecord::from_raw(raw)?;
    let record = state.log_repo.insert(&new).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// GET /api/logs
pub async fn list_logs(
    State(state): State<AppState>,
    Query(raw): Query<RawLogQuery>,
) -> Result<Json<Vec<LogRecord>>, ApiError> {
    let filter = LogFilter::from_query(raw);
    let records = state.log_repo.list(&filter).await?;
    Ok(Json(records))
}

/// DELETE /api/logs/{id}
pub async fn delete_log(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.log_repo.delete(id).await?;
    Ok(Json(MessageResponse::new("Log deleted successfully")))
}
