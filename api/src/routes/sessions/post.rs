use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use common::{config, format_validation_errors};
use db::error::DomainError;
use db::models::user::Role;
use db::models::{attendance_session, class};

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::services::qr;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct IssueSessionRequest {
    pub class_id: i64,

    #[validate(length(min = 1, message = "Subject is required"))]
    pub subject: String,
}

#[derive(Debug, Serialize, Default)]
pub struct SessionResponse {
    pub session_id: String,
    pub qr_svg: String,
    pub expires_at: String,
}

/// POST /sessions
///
/// Issues a session for a class and returns the rendered QR artifact. A
/// class owner may only issue for their own class; a class assistant may
/// issue for any class.
pub async fn issue_session(
    State(app_state): State<AppState>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    Json(req): Json<IssueSessionRequest>,
) -> (StatusCode, Json<ApiResponse<SessionResponse>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }

    if user.role == Role::ClassOwner && user.class_id != Some(req.class_id) {
        return error_response(DomainError::PermissionDenied);
    }

    let db = app_state.db();
    match class::Model::find_by_id(db, req.class_id).await {
        Ok(Some(_)) => {}
        Ok(None) => return error_response(DomainError::NotFound("class")),
        Err(e) => return error_response(e),
    }

    let session = match attendance_session::Model::create(
        db,
        req.class_id,
        user.id,
        &req.subject,
        Utc::now(),
        config::session_expiry_minutes(),
    )
    .await
    {
        Ok(s) => s,
        Err(e) => return error_response(e),
    };

    match qr::render_svg(&session.payload) {
        Ok(svg) => (
            StatusCode::CREATED,
            Json(ApiResponse::success(
                SessionResponse {
                    session_id: session.id,
                    qr_svg: svg,
                    expires_at: session.expires_at.to_rfc3339(),
                },
                "Session issued",
            )),
        ),
        Err(e) => error_response(e),
    }
}
