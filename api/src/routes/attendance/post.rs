use axum::{Extension, Json, extract::State, http::StatusCode};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::Validate;

use common::{config, format_validation_errors};
use db::error::DomainError;
use db::models::{attendance_record, attendance_session, challenge};

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct ScanRequest {
    #[validate(length(min = 1, message = "Session id is required"))]
    pub session_id: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct VerifyRequest {
    #[validate(length(min = 1, message = "Session id is required"))]
    pub session_id: String,

    #[validate(length(equal = 6, message = "Code must be 6 digits"))]
    pub code: String,
}

#[derive(Debug, Serialize, Default)]
pub struct ScanResponse {
    pub expires_at: String,
}

#[derive(Debug, Serialize, Default)]
pub struct VerifyResponse {
    pub session_id: String,
    pub recorded_at: String,
}

/// POST /attendance/scan
///
/// The student scanned a session QR and submits the session id it carried.
/// Checks run in a fixed order: unknown session, expired session, wrong
/// class, attendance already recorded. On success a one-time code is stored
/// and dispatched to the student's email without blocking the response;
/// delivery failures are logged, never surfaced.
///
/// Scanning again before verifying simply issues another live code.
pub async fn scan(
    State(app_state): State<AppState>,
    Extension(CurrentUser(student)): Extension<CurrentUser>,
    Json(req): Json<ScanRequest>,
) -> (StatusCode, Json<ApiResponse<ScanResponse>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }

    let db = app_state.db();
    let now = Utc::now();

    let session = match attendance_session::Model::find_by_id(db, &req.session_id).await {
        Ok(Some(s)) => s,
        Ok(None) => return error_response(DomainError::NotFound("session")),
        Err(e) => return error_response(e),
    };

    if session.is_expired(now) {
        return error_response(DomainError::Expired("session"));
    }

    if student.class_id != Some(session.class_id) {
        return error_response(DomainError::PermissionDenied);
    }

    match attendance_record::Model::exists(db, student.id, &session.id).await {
        Ok(true) => {
            return error_response(DomainError::Conflict(
                "attendance already recorded".into(),
            ));
        }
        Ok(false) => {}
        Err(e) => return error_response(e),
    }

    let code = challenge::generate_code();
    let created = challenge::Model::create(
        db,
        student.id,
        &session.id,
        &code,
        now,
        config::otp_expiry_minutes(),
    )
    .await;

    match created {
        Ok(ch) => {
            app_state.notifier().deliver(&student.email, &ch.code);
            (
                StatusCode::OK,
                Json(ApiResponse::success(
                    ScanResponse {
                        expires_at: ch.expires_at.to_rfc3339(),
                    },
                    "Verification code sent to your email",
                )),
            )
        }
        Err(e) => error_response(e),
    }
}

/// POST /attendance/verify
///
/// The student submits the one-time code. The lookup deliberately conflates
/// a wrong code with an already-consumed one; both come back as invalid.
/// Past that, an expired code and a vanished session are reported in that
/// order, and then a single transaction records the attendance and consumes
/// every live code for this (student, session) pair.
pub async fn verify(
    State(app_state): State<AppState>,
    Extension(CurrentUser(student)): Extension<CurrentUser>,
    Json(req): Json<VerifyRequest>,
) -> (StatusCode, Json<ApiResponse<VerifyResponse>>) {
    if let Err(errors) = req.validate() {
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::error(format_validation_errors(&errors))),
        );
    }

    let db = app_state.db();
    let now = Utc::now();

    let challenge =
        match challenge::Model::find_live(db, student.id, &req.session_id, &req.code).await {
            Ok(Some(c)) => c,
            Ok(None) => return error_response(DomainError::InvalidCode),
            Err(e) => return error_response(e),
        };

    if challenge.is_expired(now) {
        return error_response(DomainError::Expired("verification code"));
    }

    let session = match attendance_session::Model::find_by_id(db, &req.session_id).await {
        Ok(Some(s)) => s,
        Ok(None) => return error_response(DomainError::NotFound("session")),
        Err(e) => return error_response(e),
    };

    match challenge.consume_and_record(db, &session, now).await {
        Ok(record) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                VerifyResponse {
                    session_id: record.session_id,
                    recorded_at: record.recorded_at.to_rfc3339(),
                },
                "Attendance recorded successfully",
            )),
        ),
        Err(e) => error_response(e),
    }
}
