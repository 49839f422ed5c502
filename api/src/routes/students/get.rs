use axum::{Extension, Json, extract::State, http::StatusCode};

use db::models::user::{self, Role};

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::common::{AccountResponse, error_response};
use crate::state::AppState;

/// GET /students
///
/// Lists learners. A class owner only sees their own class; a class
/// assistant sees every learner.
pub async fn list_students(
    State(app_state): State<AppState>,
    Extension(CurrentUser(staff)): Extension<CurrentUser>,
) -> (StatusCode, Json<ApiResponse<Vec<AccountResponse>>>) {
    let scope = if staff.role == Role::ClassOwner {
        staff.class_id
    } else {
        None
    };

    match user::Model::list_learners(app_state.db(), scope).await {
        Ok(students) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                students.into_iter().map(AccountResponse::from).collect(),
                "Students retrieved",
            )),
        ),
        Err(e) => error_response(e),
    }
}
