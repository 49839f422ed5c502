use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use validator::Validate;

use common::format_validation_errors;
use db::models::department;

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateDepartmentRequest {
    #[validate(length(min = 1, message = "Department name is required"))]
    pub name: String,
}

/// POST /departments
///
/// Creates a department. Org owner only (guarded upstream).
pub async fn create_department(
    State(app_state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CreateDepartmentRequest>,
) -> (StatusCode, Json<ApiResponse<Option<department::Model>>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }

    match department::Model::create(app_state.db(), &req.name, user.id).await {
        Ok(dept) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(dept),
                "Department created successfully",
            )),
        ),
        Err(e) => error_response(e),
    }
}
