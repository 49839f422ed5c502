use axum::{Extension, Json, extract::State, http::StatusCode};
use serde::Deserialize;
use validator::Validate;

use common::format_validation_errors;
use db::models::user::{self, Role};

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::common::{AccountResponse, error_response};
use crate::state::AppState;

lazy_static::lazy_static! {
    static ref ROLL_NO_REGEX: regex::Regex = regex::Regex::new("^[A-Za-z0-9_-]{1,32}$").unwrap();
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddStudentRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    #[validate(regex(
        path = *ROLL_NO_REGEX,
        message = "Roll number must be 1-32 letters, digits, '-' or '_'"
    ))]
    pub roll_no: String,

    /// Defaults to the registering class owner's class when omitted.
    pub class_id: Option<i64>,
}

/// POST /students
///
/// Registers a learner. Class owner only (guarded upstream); the learner is
/// always created with the learner role and no password, and lands in the
/// owner's class unless a class id is given.
pub async fn add_student(
    State(app_state): State<AppState>,
    Extension(CurrentUser(owner)): Extension<CurrentUser>,
    Json(req): Json<AddStudentRequest>,
) -> (StatusCode, Json<ApiResponse<AccountResponse>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }

    let class_id = req.class_id.or(owner.class_id);

    match user::Model::create(
        app_state.db(),
        &req.email,
        &req.username,
        None,
        Role::Learner,
        owner.department_id,
        class_id,
        Some(&req.roll_no),
    )
    .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                created.into(),
                "Student registered successfully",
            )),
        ),
        Err(e) => error_response(e),
    }
}
