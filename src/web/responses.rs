//! HTTP response types and utilities
//!
//! Control endpoints answer with a flat [`StatusResponse`]; failures use the
//! [`ApiResponse`] envelope so clients can always check `success`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::{AudioTrack, PlaybackState, Variant};
use crate::services::playback::BUFFER_STATUS_OK;
use crate::services::StreamSnapshot;

/// Error envelope for rejected requests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Always false for an error body
    pub success: bool,
    pub error: String,
}

impl ApiResponse {
    pub fn error(message: String) -> Self {
        Self {
            success: false,
            error: message,
        }
    }
}

/// Player status returned by every control endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusResponse {
    pub current_position: f64,
    pub buffer_length: f64,
    pub total_length: f64,
    pub buffer_status: String,
    pub state: PlaybackState,
    pub hls_url: String,
    pub variants: Vec<Variant>,
    pub audio_tracks: Vec<AudioTrack>,
    pub is_vod: bool,
    pub media_url: Option<String>,
    pub live_polling: bool,
}

impl From<StreamSnapshot> for StatusResponse {
    fn from(snapshot: StreamSnapshot) -> Self {
        Self {
            current_position: snapshot.playback.position,
            buffer_length: snapshot.playback.buffer_length,
            total_length: snapshot.metadata.total_length,
            buffer_status: BUFFER_STATUS_OK.to_string(),
            state: snapshot.playback.state,
            hls_url: snapshot.hls_url,
            variants: snapshot.metadata.variants,
            audio_tracks: snapshot.metadata.audio_tracks,
            is_vod: snapshot.metadata.is_vod,
            media_url: snapshot.metadata.media_url,
            live_polling: snapshot.live_polling,
        }
    }
}

impl IntoResponse for StatusResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Convert AppError to appropriate HTTP response
pub fn handle_error(error: AppError) -> Response {
    let (status, message) = match &error {
        AppError::Validation { message } => (StatusCode::BAD_REQUEST, message.clone()),
        AppError::Fetch(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
        AppError::Configuration { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Configuration error: {}", message),
        ),
        AppError::Internal { message } => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Internal error: {}", message),
        ),
    };

    if status.is_server_error() {
        tracing::error!("Request failed: {}", error);
    } else {
        tracing::debug!("Request rejected: {}", error);
    }

    (status, Json(ApiResponse::error(message))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        handle_error(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::FetchError;
    use crate::models::StreamMetadata;
    use crate::services::StreamState;

    #[test]
    fn test_status_from_snapshot() {
        let snapshot = StreamState::new("https://example.com/a.m3u8", StreamMetadata::placeholder(5400.0));
        let status = StatusResponse::from(snapshot);

        assert_eq!(status.current_position, 1234.5);
        assert_eq!(status.buffer_length, 3600.0);
        assert_eq!(status.total_length, 5400.0);
        assert_eq!(status.buffer_status, "ok");
        assert_eq!(status.state, PlaybackState::Playing);
        assert!(status.media_url.is_none());

        let json = serde_json::to_value(&status).unwrap();
        assert_eq!(json["state"], "playing");
        assert!(json["media_url"].is_null());
        assert_eq!(json["live_polling"], false);
    }

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            handle_error(AppError::validation("bad")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            handle_error(FetchError::timeout("https://example.com").into()).status(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            handle_error(AppError::internal("boom")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_body_omits_data() {
        let json = serde_json::to_value(ApiResponse::error("nope".to_string())).unwrap();
        assert_eq!(json, serde_json::json!({"success": false, "error": "nope"}));
    }
}
