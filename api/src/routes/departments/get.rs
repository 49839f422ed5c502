use axum::{Json, extract::State, http::StatusCode};

use db::models::department;

use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;

/// GET /departments
pub async fn list_departments(
    State(app_state): State<AppState>,
) -> (StatusCode, Json<ApiResponse<Vec<department::Model>>>) {
    match department::Model::list(app_state.db()).await {
        Ok(depts) => (
            StatusCode::OK,
            Json(ApiResponse::success(depts, "Departments retrieved")),
        ),
        Err(e) => error_response(e),
    }
}
