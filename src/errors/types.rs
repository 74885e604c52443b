//! Error type definitions for the player control service

use thiserror::Error;

/// Top-level application error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Request validation errors
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Manifest fetch errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal { message: String },
}

/// Failure to retrieve a manifest over the network
///
/// URLs carried here have any embedded credentials obfuscated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// Connection or protocol failure before a response arrived
    #[error("Request failed: {url} - {message}")]
    Request { url: String, message: String },

    /// The request did not complete within the configured timeout
    #[error("Request timed out: {url}")]
    Timeout { url: String },

    /// The server answered with a non-success status
    #[error("HTTP error: {status} - {url}")]
    Status { url: String, status: u16 },

    /// The response body could not be read as text
    #[error("Failed to read response body: {url} - {message}")]
    Body { url: String, message: String },
}

impl AppError {
    /// Create a validation error with a custom message
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn configuration<S: Into<String>>(message: S) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

impl FetchError {
    pub fn request<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Request {
            url: url.into(),
            message: message.into(),
        }
    }

    pub fn timeout<U: Into<String>>(url: U) -> Self {
        Self::Timeout { url: url.into() }
    }

    pub fn status<U: Into<String>>(url: U, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    pub fn body<U: Into<String>, M: Into<String>>(url: U, message: M) -> Self {
        Self::Body {
            url: url.into(),
            message: message.into(),
        }
    }

    /// The (obfuscated) URL the failed fetch targeted
    pub fn url(&self) -> &str {
        match self {
            Self::Request { url, .. }
            | Self::Timeout { url }
            | Self::Status { url, .. }
            | Self::Body { url, .. } => url,
        }
    }
}
