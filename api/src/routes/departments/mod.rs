//! Routes for the `/departments` endpoint group.
//!
//! - `POST /departments` — create (org owner only)
//! - `GET /departments` — list (any authenticated account)

pub mod get;
pub mod post;

use axum::{Router, middleware::from_fn_with_state, routing::post};

use crate::auth::guards::{allow_authenticated, allow_org_owner};
use crate::state::AppState;

pub fn department_routes(app_state: AppState) -> Router<AppState> {
    Router::new().route(
        "/",
        post(post::create_department)
            .route_layer(from_fn_with_state(app_state.clone(), allow_org_owner))
            .get(get::list_departments)
            .route_layer(from_fn_with_state(app_state, allow_authenticated)),
    )
}
