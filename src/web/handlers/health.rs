use axum::{response::IntoResponse, Json};

use crate::web::responses::HealthResponse;

/// Liveness check; does not touch the stream state
pub async fn health_check() -> impl IntoResponse {
    Json(HealthResponse::healthy())
}
