//! Shared helpers for route handlers: the single place where domain error
//! kinds become HTTP status codes, and small parsing utilities.

use axum::{Json, http::StatusCode};
use chrono::{DateTime, NaiveDate, Utc};
use db::error::DomainError;
use db::models::user;
use serde::Serialize;

use crate::response::ApiResponse;

/// Account shape returned by auth and registration endpoints. The password
/// hash never leaves the db layer.
#[derive(Debug, Serialize, Default)]
pub struct AccountResponse {
    pub id: i64,
    pub email: String,
    pub username: String,
    pub role: String,
    pub department_id: Option<i64>,
    pub class_id: Option<i64>,
    pub roll_no: Option<String>,
    pub is_active: bool,
}

impl From<user::Model> for AccountResponse {
    fn from(u: user::Model) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            role: u.role.to_string(),
            department_id: u.department_id,
            class_id: u.class_id,
            roll_no: u.roll_no,
            is_active: u.is_active,
        }
    }
}

/// One kind, one status. Expiry is reported as 400 with a stable message
/// rather than 410; clients branch on the message the same way either path.
pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::Unauthenticated => StatusCode::UNAUTHORIZED,
        DomainError::PermissionDenied => StatusCode::FORBIDDEN,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Expired(_) => StatusCode::BAD_REQUEST,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::InvalidCode => StatusCode::BAD_REQUEST,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Db(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Turns a domain error into the standard envelope. Database failures are
/// logged here and reported with a generic message.
pub fn error_response<T>(err: DomainError) -> (StatusCode, Json<ApiResponse<T>>)
where
    T: Serialize + Default,
{
    let status = status_for(&err);
    let message = match &err {
        DomainError::Db(e) => {
            tracing::error!(error = %e, "database failure");
            "A database error occurred".to_string()
        }
        other => other.to_string(),
    };
    (status, Json(ApiResponse::error(message)))
}

/// Parses a report date bound: either a full RFC 3339 timestamp or a bare
/// `YYYY-MM-DD` date. A bare date means start-of-day for the lower bound and
/// end-of-day for the upper bound.
pub fn parse_date_bound(raw: &str, end_of_day: bool) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    let date: NaiveDate = raw
        .parse()
        .map_err(|_| DomainError::Validation(format!("invalid date '{raw}'")))?;
    let time = if end_of_day {
        date.and_hms_opt(23, 59, 59)
    } else {
        date.and_hms_opt(0, 0, 0)
    };
    // and_hms_opt only fails on out-of-range components, which these are not
    Ok(time
        .ok_or_else(|| DomainError::Validation(format!("invalid date '{raw}'")))?
        .and_utc())
}
