//! Routes for the `/attendance` endpoint group. Learner only.
//!
//! - `POST /attendance/scan` — student scanned a session QR; issues a
//!   one-time code to their email
//! - `POST /attendance/verify` — student submits the code; commits the
//!   attendance record

pub mod post;

use axum::{Router, middleware::from_fn_with_state, routing::post};

use crate::auth::guards::allow_learner;
use crate::state::AppState;

pub fn attendance_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route("/scan", post(post::scan))
        .route("/verify", post(post::verify))
        .route_layer(from_fn_with_state(app_state, allow_learner))
}
