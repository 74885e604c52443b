//! Configuration default values
//!
//! All defaults live here so they can be changed in one place.
// Web server defaults
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8080;

// Stream defaults
pub const DEFAULT_HLS_URL: &str =
    "https://edge.waoplay.com/live/encoder03/2026-01-12_15.21.54/ori/master.m3u8";
pub const DEFAULT_TOTAL_LENGTH: f64 = 5400.0;
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;

// Placeholder playback values reported until a real pipeline exists
pub const DEFAULT_INITIAL_POSITION: f64 = 1234.5;
pub const DEFAULT_BUFFER_LENGTH: f64 = 3600.0;

/// Environment variable overriding the default stream URL
pub const HLS_URL_ENV: &str = "HLS_URL";
