use axum::{Json, extract::State, http::StatusCode};

use db::models::class;

use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;

/// GET /classes
pub async fn list_classes(
    State(app_state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<class::Model>>>) {
    match class::Model::list(app_state.db()).await {
        Ok(classes) => (
            StatusCode::OK,
            Json(ApiResponse::success(classes, "Classes retrieved")),
        ),
        Err(e) => error_response(e),
    }
}
