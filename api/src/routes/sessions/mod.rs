//! Routes for the `/sessions` endpoint group.
//!
//! - `POST /sessions` — issue a time-boxed attendance session with its QR
//!   artifact (class owner or class assistant)

pub mod post;

use axum::{Router, middleware::from_fn_with_state, routing::post};

use crate::auth::guards::allow_teachers;
use crate::state::AppState;

pub fn session_routes(app_state: AppState) -> Router<AppState> {
    Router::new().route(
        "/",
        post(post::issue_session).route_layer(from_fn_with_state(app_state, allow_teachers)),
    )
}
