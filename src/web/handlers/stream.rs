//! Stream selection and status handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::utils::url::UrlUtils;
use crate::web::{responses::StatusResponse, AppState};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetStreamRequest {
    pub hls_url: String,
}

pub async fn get_status(State(state): State<AppState>) -> StatusResponse {
    state.stream_state.snapshot().await.into()
}

/// Switch to a new master playlist
///
/// Manifest fetch failures are not reported as errors; the response then
/// carries the new URL with empty metadata.
pub async fn set_stream(
    State(state): State<AppState>,
    payload: Result<Json<SetStreamRequest>, JsonRejection>,
) -> AppResult<StatusResponse> {
    let Json(request) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    let url = request.hls_url.trim();
    if !UrlUtils::is_http_url(url) {
        return Err(AppError::validation(
            "hls_url must be an absolute http or https URL",
        ));
    }

    Ok(state.stream_state.set_stream(url).await.into())
}

pub async fn clear_stream(State(state): State<AppState>) -> StatusResponse {
    state.stream_state.clear_stream().await.into()
}
