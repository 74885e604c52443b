//! Helper functions shared across the player service
//!
//! - `utils::url` for URL resolution, validation and log-safe display

pub mod url;
