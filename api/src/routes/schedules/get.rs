use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use db::models::schedule;

use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    pub class_id: Option<i64>,
    pub teacher_id: Option<i64>,
}

/// GET /schedules?class_id=&teacher_id=
pub async fn list_schedules(
    State(app_state): State<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<schedule::Model>>>) {
    match schedule::Model::list(app_state.db(), query.class_id, query.teacher_id).await {
        Ok(schedules) => (
            StatusCode::OK,
            Json(ApiResponse::success(schedules, "Schedules retrieved")),
        ),
        Err(e) => error_response(e),
    }
}
