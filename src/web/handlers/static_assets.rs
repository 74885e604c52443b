//! Static asset handlers
//!
//! Serves the embedded script and stylesheet used by the control page.

use axum::{
    extract::Path,
    http::{header, StatusCode},
    response::IntoResponse,
};

use crate::assets::StaticAssets;

/// Serve a static asset by path
pub async fn serve_static_asset(Path(path): Path<String>) -> impl IntoResponse {
    let asset_path = format!("static/{path}");

    match StaticAssets::get_asset(&asset_path) {
        Some(file) => (
            [
                (header::CONTENT_TYPE, StaticAssets::get_content_type(&path)),
                (header::CACHE_CONTROL, "public, max-age=3600"),
            ],
            file.data.into_owned(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "Asset not found").into_response(),
    }
}
