use std::collections::HashMap;

use axum::{
    Extension, Json,
    extract::{Query, State},
    http::StatusCode,
};
use chrono::{Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use db::models::user::{self, Role};
use db::models::{attendance_record, class};

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::common::{error_response, parse_date_bound};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    pub class_id: Option<i64>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// One attendance record joined with the student and class it points at.
#[derive(Debug, Serialize)]
pub struct ReportRow {
    pub session_id: String,
    pub student_id: i64,
    pub class_id: i64,
    pub teacher_id: i64,
    pub subject: String,
    pub status: String,
    pub recorded_at: String,
    pub student_name: String,
    pub student_roll_no: String,
    pub class_name: String,
}

/// GET /reports/attendance?class_id=&start_date=&end_date=
///
/// Attendance records filtered by class and date range. A class owner with
/// no explicit class filter defaults to their own class; assistants and
/// admins default to everything.
pub async fn attendance_report(
    State(app_state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
    Query(query): Query<ReportQuery>,
) -> (StatusCode, Json<ApiResponse<Vec<ReportRow>>>) {
    let db = app_state.db();

    let class_filter = query.class_id.or(if viewer.role == Role::ClassOwner {
        viewer.class_id
    } else {
        None
    });

    let from = match &query.start_date {
        Some(raw) => match parse_date_bound(raw, false) {
            Ok(dt) => Some(dt),
            Err(e) => return error_response(e),
        },
        None => None,
    };
    let to = match &query.end_date {
        Some(raw) => match parse_date_bound(raw, true) {
            Ok(dt) => Some(dt),
            Err(e) => return error_response(e),
        },
        None => None,
    };

    let records = match attendance_record::Model::list_filtered(db, class_filter, from, to).await {
        Ok(r) => r,
        Err(e) => return error_response(e),
    };

    let students: HashMap<i64, user::Model> = match user::Model::list_learners(db, None).await {
        Ok(list) => list.into_iter().map(|s| (s.id, s)).collect(),
        Err(e) => return error_response(e),
    };
    let classes: HashMap<i64, class::Model> = match class::Model::list(db).await {
        Ok(list) => list.into_iter().map(|c| (c.id, c)).collect(),
        Err(e) => return error_response(e),
    };

    let rows = records
        .into_iter()
        .map(|r| {
            let student = students.get(&r.student_id);
            ReportRow {
                session_id: r.session_id,
                student_id: r.student_id,
                class_id: r.class_id,
                teacher_id: r.teacher_id,
                subject: r.subject,
                status: r.status,
                recorded_at: r.recorded_at.to_rfc3339(),
                student_name: student
                    .map(|s| s.username.clone())
                    .unwrap_or_else(|| "Unknown".into()),
                student_roll_no: student
                    .and_then(|s| s.roll_no.clone())
                    .unwrap_or_else(|| "Unknown".into()),
                class_name: classes
                    .get(&r.class_id)
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| "Unknown".into()),
            }
        })
        .collect();

    (
        StatusCode::OK,
        Json(ApiResponse::success(rows, "Attendance report retrieved")),
    )
}

/// GET /dashboard
///
/// Role-dependent summary. Learners see their own today-count, teaching
/// staff see today's count for their scope, admins see org totals.
pub async fn dashboard(
    State(app_state): State<AppState>,
    Extension(CurrentUser(viewer)): Extension<CurrentUser>,
) -> (StatusCode, Json<ApiResponse<Value>>) {
    let db = app_state.db();
    let day_start = Utc::now().date_naive().and_time(NaiveTime::MIN).and_utc();
    let day_end = day_start + Duration::days(1);

    let data = match viewer.role {
        Role::Learner => {
            match attendance_record::Model::count_for_student_between(
                db, viewer.id, day_start, day_end,
            )
            .await
            {
                Ok(count) => json!({
                    "role": viewer.role,
                    "today_attendance": count,
                    "class_id": viewer.class_id,
                }),
                Err(e) => return error_response(e),
            }
        }
        Role::ClassOwner | Role::ClassAssistant => {
            let scope = if viewer.role == Role::ClassOwner {
                viewer.class_id
            } else {
                None
            };
            match attendance_record::Model::count_between(db, scope, day_start, day_end).await {
                Ok(count) => json!({
                    "role": viewer.role,
                    "today_attendance_marked": count,
                    "class_id": viewer.class_id,
                }),
                Err(e) => return error_response(e),
            }
        }
        Role::OrgOwner | Role::OrgAdmin => {
            let total_students = match user::Model::count_learners(db).await {
                Ok(n) => n,
                Err(e) => return error_response(e),
            };
            let total_classes = match class::Model::count(db).await {
                Ok(n) => n,
                Err(e) => return error_response(e),
            };
            let today =
                match attendance_record::Model::count_between(db, None, day_start, day_end).await {
                    Ok(n) => n,
                    Err(e) => return error_response(e),
                };
            json!({
                "role": viewer.role,
                "total_students": total_students,
                "total_classes": total_classes,
                "today_attendance": today,
            })
        }
    };

    (
        StatusCode::OK,
        Json(ApiResponse::success(data, "Dashboard data retrieved")),
    )
}
