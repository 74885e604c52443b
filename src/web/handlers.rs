//! HTTP request handlers organized by concern
//!
//! Handlers stay thin: they validate input at the boundary and delegate to
//! [`crate::services::StreamStateManager`].

pub mod health;
pub mod index;
pub mod playback;
pub mod static_assets;
pub mod stream;
