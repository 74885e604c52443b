//! Index page handler
//!
//! Serves the embedded control page as the index page.

use axum::response::{Html, IntoResponse, Response};

use crate::assets::StaticAssets;
use crate::errors::AppError;

/// Serve the index page from embedded static assets
pub async fn index() -> Response {
    match StaticAssets::get_asset("static/index.html") {
        Some(file) => {
            let content = String::from_utf8_lossy(&file.data);
            Html(content.into_owned()).into_response()
        }
        None => AppError::internal("control page is not embedded").into_response(),
    }
}
