//! Playback position bookkeeping
//!
//! There is no media pipeline behind these controls yet. The controller only
//! tracks the requested state and a position derived from the current
//! stream's duration so clients get a consistent status document.

use serde::{Deserialize, Serialize};

use crate::config::defaults::{DEFAULT_BUFFER_LENGTH, DEFAULT_INITIAL_POSITION};
use crate::errors::{AppError, AppResult};
use crate::models::PlaybackState;

/// Buffer health reported alongside the playback position
pub const BUFFER_STATUS_OK: &str = "ok";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaybackController {
    pub state: PlaybackState,
    /// Seconds from the start of the stream
    pub position: f64,
    /// Seconds of media buffered ahead of `position`
    pub buffer_length: f64,
}

impl Default for PlaybackController {
    fn default() -> Self {
        Self {
            state: PlaybackState::Playing,
            position: DEFAULT_INITIAL_POSITION,
            buffer_length: DEFAULT_BUFFER_LENGTH,
        }
    }
}

impl PlaybackController {
    pub fn play(&mut self) {
        self.state = PlaybackState::Playing;
    }

    pub fn pause(&mut self) {
        self.state = PlaybackState::Paused;
    }

    /// Stop and rewind to the start
    pub fn stop(&mut self) {
        self.state = PlaybackState::Stopped;
        self.position = 0.0;
    }

    pub fn skip_forward(&mut self, seconds: f64) {
        self.position += seconds;
    }

    pub fn skip_backward(&mut self, seconds: f64) {
        self.position = (self.position - seconds).max(0.0);
    }

    pub fn jump_from_start(&mut self, seconds: f64, total_length: f64) {
        self.position = seconds.min(total_length);
    }

    pub fn jump_from_end(&mut self, seconds: f64, total_length: f64) {
        self.position = (total_length - seconds).max(0.0);
    }
}

/// Check a seek amount supplied by a client
pub fn validate_seconds(seconds: f64) -> AppResult<f64> {
    if !seconds.is_finite() {
        return Err(AppError::validation("seconds must be a finite number"));
    }
    if seconds < 0.0 {
        return Err(AppError::validation("seconds must not be negative"));
    }
    Ok(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let playback = PlaybackController::default();
        assert_eq!(playback.state, PlaybackState::Playing);
        assert_eq!(playback.position, 1234.5);
        assert_eq!(playback.buffer_length, 3600.0);
    }

    #[test]
    fn test_stop_rewinds_and_play_resumes_in_place() {
        let mut playback = PlaybackController::default();
        playback.pause();
        assert_eq!(playback.state, PlaybackState::Paused);
        assert_eq!(playback.position, 1234.5);

        playback.stop();
        assert_eq!(playback.state, PlaybackState::Stopped);
        assert_eq!(playback.position, 0.0);

        playback.skip_forward(30.0);
        playback.play();
        assert_eq!(playback.state, PlaybackState::Playing);
        assert_eq!(playback.position, 30.0);
    }

    #[test]
    fn test_skips() {
        let mut playback = PlaybackController::default();
        playback.skip_forward(10.0);
        assert_eq!(playback.position, 1244.5);
        playback.skip_backward(20.0);
        assert_eq!(playback.position, 1224.5);
        playback.skip_backward(5000.0);
        assert_eq!(playback.position, 0.0);
    }

    #[test]
    fn test_jumps_are_bounded_by_total_length() {
        let mut playback = PlaybackController::default();
        playback.jump_from_start(60.0, 5400.0);
        assert_eq!(playback.position, 60.0);
        playback.jump_from_start(9000.0, 5400.0);
        assert_eq!(playback.position, 5400.0);
        playback.jump_from_end(60.0, 5400.0);
        assert_eq!(playback.position, 5340.0);
        playback.jump_from_end(9000.0, 5400.0);
        assert_eq!(playback.position, 0.0);
    }

    #[test]
    fn test_validate_seconds() {
        assert_eq!(validate_seconds(0.0).unwrap(), 0.0);
        assert_eq!(validate_seconds(12.5).unwrap(), 12.5);
        assert!(validate_seconds(-1.0).is_err());
        assert!(validate_seconds(f64::NAN).is_err());
        assert!(validate_seconds(f64::INFINITY).is_err());
    }
}
