//! Playback control handlers
//!
//! Seek amounts arrive as path segments and are parsed here so malformed
//! values produce the JSON error envelope rather than a bare rejection.

use axum::extract::{Path, State};

use crate::errors::{AppError, AppResult};
use crate::services::playback::validate_seconds;
use crate::web::{responses::StatusResponse, AppState};

fn parse_seconds(raw: &str) -> AppResult<f64> {
    let seconds = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| AppError::validation(format!("'{}' is not a number of seconds", raw)))?;
    validate_seconds(seconds)
}

pub async fn play(State(state): State<AppState>) -> StatusResponse {
    state
        .stream_state
        .update_playback(|playback, _| playback.play())
        .await
        .into()
}

pub async fn pause(State(state): State<AppState>) -> StatusResponse {
    state
        .stream_state
        .update_playback(|playback, _| playback.pause())
        .await
        .into()
}

pub async fn stop(State(state): State<AppState>) -> StatusResponse {
    state
        .stream_state
        .update_playback(|playback, _| playback.stop())
        .await
        .into()
}

pub async fn skip_forward(
    State(state): State<AppState>,
    Path(seconds): Path<String>,
) -> AppResult<StatusResponse> {
    let seconds = parse_seconds(&seconds)?;
    Ok(state
        .stream_state
        .update_playback(|playback, _| playback.skip_forward(seconds))
        .await
        .into())
}

pub async fn skip_backward(
    State(state): State<AppState>,
    Path(seconds): Path<String>,
) -> AppResult<StatusResponse> {
    let seconds = parse_seconds(&seconds)?;
    Ok(state
        .stream_state
        .update_playback(|playback, _| playback.skip_backward(seconds))
        .await
        .into())
}

pub async fn jump_from_start(
    State(state): State<AppState>,
    Path(seconds): Path<String>,
) -> AppResult<StatusResponse> {
    let seconds = parse_seconds(&seconds)?;
    Ok(state
        .stream_state
        .update_playback(|playback, total| playback.jump_from_start(seconds, total))
        .await
        .into())
}

pub async fn jump_from_end(
    State(state): State<AppState>,
    Path(seconds): Path<String>,
) -> AppResult<StatusResponse> {
    let seconds = parse_seconds(&seconds)?;
    Ok(state
        .stream_state
        .update_playback(|playback, total| playback.jump_from_end(seconds, total))
        .await
        .into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seconds() {
        assert_eq!(parse_seconds("10").unwrap(), 10.0);
        assert_eq!(parse_seconds("2.5").unwrap(), 2.5);
        assert!(parse_seconds("abc").is_err());
        assert!(parse_seconds("-3").is_err());
        assert!(parse_seconds("NaN").is_err());
        assert!(parse_seconds("inf").is_err());
    }
}
