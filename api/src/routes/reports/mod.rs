//! Routes for the `/reports` endpoint group.
//!
//! - `GET /reports/attendance` — attendance records enriched with student
//!   and class details (class owner, class assistant, org admin)

pub mod get;

use axum::{Router, middleware::from_fn_with_state, routing::get};

use crate::auth::guards::allow_report_viewers;
use crate::state::AppState;

pub fn report_routes(app_state: AppState) -> Router<AppState> {
    Router::new().route(
        "/attendance",
        get(get::attendance_report)
            .route_layer(from_fn_with_state(app_state, allow_report_viewers)),
    )
}
