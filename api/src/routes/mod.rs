//! HTTP route entry point for `/api/...`.
//!
//! Routes are organized by resource, each protected by the guard its
//! operation demands:
//! - `/` and `/health` → public status endpoints
//! - `/auth` → login (public), register (owner/admin), me (authenticated)
//! - `/departments` → create (owner), list (authenticated)
//! - `/classes`, `/schedules` → create (admin), list (authenticated)
//! - `/sessions` → issue (teaching staff)
//! - `/attendance` → scan/verify (learners)
//! - `/students` → register (class owner), list (teaching staff)
//! - `/reports`, `/dashboard` → reporting views

use axum::{Router, middleware::from_fn_with_state, routing::get};

use crate::auth::guards::allow_authenticated;
use crate::state::AppState;

pub mod attendance;
pub mod auth;
pub mod classes;
pub mod common;
pub mod departments;
pub mod health;
pub mod reports;
pub mod schedules;
pub mod sessions;
pub mod students;

/// Builds the complete application router, to be nested under `/api`.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(health::root))
        .nest("/health", health::health_routes())
        .nest("/auth", auth::auth_routes(app_state.clone()))
        .nest(
            "/departments",
            departments::department_routes(app_state.clone()),
        )
        .nest("/classes", classes::class_routes(app_state.clone()))
        .nest("/schedules", schedules::schedule_routes(app_state.clone()))
        .nest("/sessions", sessions::session_routes(app_state.clone()))
        .nest(
            "/attendance",
            attendance::attendance_routes(app_state.clone()),
        )
        .nest("/students", students::student_routes(app_state.clone()))
        .nest("/reports", reports::report_routes(app_state.clone()))
        .route(
            "/dashboard",
            get(reports::get::dashboard)
                .route_layer(from_fn_with_state(app_state.clone(), allow_authenticated)),
        )
        .with_state(app_state)
}
