//! Centralized error handling for the player control service
//!
//! Parsers in [`crate::hls`] never fail; the only fallible boundary in the
//! manifest subsystem is the network fetch, which surfaces as
//! [`FetchError`]. Everything the web layer can report is an [`AppError`].
//!
//! # Usage
//!
//! ```rust
//! use hls2srt_player::errors::{AppError, AppResult};
//!
//! fn validate(seconds: f64) -> AppResult<f64> {
//!     if seconds < 0.0 {
//!         return Err(AppError::validation("seconds must not be negative"));
//!     }
//!     Ok(seconds)
//! }
//! ```

pub mod types;

pub use types::*;

/// Convenience type alias for Results using AppError
pub type AppResult<T> = Result<T, AppError>;

/// Convenience type alias for manifest fetch results
pub type FetchResult<T> = Result<T, FetchError>;
