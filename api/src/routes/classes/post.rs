use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use validator::Validate;

use common::format_validation_errors;
use db::models::class;

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateClassRequest {
    #[validate(length(min = 1, message = "Class name is required"))]
    pub name: String,
    pub department_id: i64,
}

/// POST /classes
///
/// Creates a class under an existing department. Org admin only (guarded
/// upstream). 404 when the department does not exist.
pub async fn create_class(
    State(app_state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<CreateClassRequest>,
) -> (StatusCode, Json<ApiResponse<Option<class::Model>>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }

    match class::Model::create(app_state.db(), &req.name, req.department_id, user.id).await {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                Some(created),
                "Class created successfully",
            )),
        ),
        Err(e) => error_response(e),
    }
}
