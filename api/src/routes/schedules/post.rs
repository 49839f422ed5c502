use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;
use validator::Validate;

use common::format_validation_errors;
use db::models::schedule;

use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateScheduleRequest {
    pub class_id: i64,
    pub teacher_id: i64,

    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,

    #[validate(length(min = 1, message = "Start time is required"))]
    pub start_time: String,

    #[validate(length(min = 1, message = "End time is required"))]
    pub end_time: String,

    #[validate(length(min = 1, message = "Day of week is required"))]
    pub day_of_week: String,
}

/// POST /schedules
///
/// Creates a timetable slot for an existing class. Org admin only (guarded
/// upstream). 404 when the class does not exist.
pub async fn create_schedule(
    State(app_state): State<AppState>,
    Json(req): Json<CreateScheduleRequest>,
) -> (StatusCode, Json<ApiResponse<Option<schedule::Model>>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }

    match schedule::Model::create(
        app_state.db(),
        req.class_id,
        req.teacher_id,
        &req.subject,
        &req.start_time,
        &req.end_time,
        &req.day_of_week,
    )
    .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(created),
                "Schedule created successfully",
            )),
        ),
        Err(e) => error_response(e),
    }
}
