use axum::{Json, Router, http::StatusCode, routing::get};
use serde_json::{Value, json};

use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /api/
///
/// Public status message so deployments can be smoke-tested with curl.
pub async fn root() -> (StatusCode, Json<ApiResponse<Value>>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            json!({ "status": "running" }),
            "QR Attendance System API",
        )),
    )
}

/// GET /api/health
pub async fn health() -> (StatusCode, Json<ApiResponse<Value>>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(json!({ "healthy": true }), "ok")),
    )
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health))
}
