//! Routes for the `/schedules` endpoint group.
//!
//! - `POST /schedules` — create (org admin only)
//! - `GET /schedules` — list, filterable by class and teacher (any
//!   authenticated account)

pub mod get;
pub mod post;

use axum::{Router, middleware::from_fn_with_state, routing::post};

use crate::auth::guards::{allow_authenticated, allow_org_admin};
use crate::state::AppState;

pub fn schedule_routes(app_state: AppState) -> Router<AppState> {
    Router::new().route(
        "/",
        post(post::create_schedule)
            .route_layer(from_fn_with_state(app_state.clone(), allow_org_admin))
            .get(get::list_schedules)
            .route_layer(from_fn_with_state(app_state, allow_authenticated)),
    )
}
