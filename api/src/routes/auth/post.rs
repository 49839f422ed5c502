use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use validator::Validate;

use common::format_validation_errors;
use db::error::DomainError;
use db::models::user::{self, Role};

use crate::auth::generate_jwt;
use crate::response::ApiResponse;
use crate::routes::common::{AccountResponse, error_response};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,

    /// Required for every role except learner.
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    pub role: Role,
    pub department_id: Option<i64>,
    pub class_id: Option<i64>,
    pub roll_no: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct StudentLoginRequest {
    #[validate(length(min = 1, message = "Roll number is required"))]
    pub roll_no: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

#[derive(Debug, Serialize, Default)]
pub struct AuthResponse {
    pub token: String,
    pub expires_at: String,
    pub user: AccountResponse,
}

/// POST /auth/register
///
/// Creates an account of any role. Guarded upstream: only org owners and
/// org admins reach this handler.
///
/// - `201 Created` with the account on success
/// - `400 Bad Request` on validation failure
/// - `409 Conflict` when the email is taken
pub async fn register(
    State(app_state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> (StatusCode, Json<ApiResponse<AccountResponse>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }

    match user::Model::create(
        app_state.db(),
        &req.email,
        &req.username,
        req.password.as_deref(),
        req.role,
        req.department_id,
        req.class_id,
        req.roll_no.as_deref(),
    )
    .await
    {
        Ok(created) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                created.into(),
                "Account registered successfully",
            )),
        ),
        Err(e) => error_response(e),
    }
}

/// POST /auth/login
///
/// Password login for staff roles. Learners have no password and are
/// rejected here the same way as a wrong password.
pub async fn login(
    State(app_state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> (StatusCode, Json<ApiResponse<AuthResponse>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }

    match user::Model::verify_credentials(app_state.db(), &req.email, &req.password).await {
        Ok(user) => {
            let (token, expires_at) = generate_jwt(user.id, user.role);
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    AuthResponse {
                        token,
                        expires_at,
                        user: user.into(),
                    },
                    "Login successful",
                )),
            )
        }
        Err(DomainError::Unauthenticated) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Incorrect email or password")),
        ),
        Err(e) => error_response(e),
    }
}

/// POST /auth/student-login
///
/// Learner login by (roll number, email) pair; no secret involved. Issues
/// the same JWT shape as the password login.
pub async fn student_login(
    State(app_state): State<AppState>,
    Json(req): Json<StudentLoginRequest>,
) -> (StatusCode, Json<ApiResponse<AuthResponse>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }

    match user::Model::verify_learner(app_state.db(), &req.roll_no, &req.email).await {
        Ok(user) => {
            let (token, expires_at) = generate_jwt(user.id, user.role);
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    AuthResponse {
                        token,
                        expires_at,
                        user: user.into(),
                    },
                    "Login successful",
                )),
            )
        }
        Err(DomainError::Unauthenticated) => (
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Invalid roll number or email")),
        ),
        Err(e) => error_response(e),
    }
}
