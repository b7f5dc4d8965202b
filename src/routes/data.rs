//! Sheet data endpoints.

use axum::{extract::State, Json};
use serde::Serialize;

use super::AppState;
use crate::error::ApiError;
use crate::models::Record;
use crate::services::cache_service::RecordSource;

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub message: &'static str,
    pub data: Vec<Record>,
}

/// GET /data - Cached records, refetched first when stale.
pub async fn get_data<S: RecordSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<Vec<Record>>, ApiError> {
    state
        .cache
        .get_data()
        .await
        .map(Json)
        .map_err(|_| ApiError::DataUnavailable)
}

/// GET /refresh - Refetch now and replace the cache.
pub async fn refresh<S: RecordSource>(
    State(state): State<AppState<S>>,
) -> Result<Json<RefreshResponse>, ApiError> {
    let data = state
        .cache
        .force_refresh()
        .await
        .map_err(|e| ApiError::RefreshFailed(e.to_string()))?;

    Ok(Json(RefreshResponse {
        message: "Cache updated",
        data,
    }))
}
