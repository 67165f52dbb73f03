//! Health check handler.

use axum::Json;

use crate::dto::response::OkResponse;

/// GET /api/v1/health
pub async fn health() -> Json<OkResponse> {
    Json(OkResponse::ok())
}
