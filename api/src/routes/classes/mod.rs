//! Routes for the `/classes` endpoint group.
//!
//! - `POST /classes` — create (org admin only)
//! - `GET /classes` — list (any authenticated account)

pub mod get;
pub mod post;

use axum::{Router, middleware::from_fn_with_state, routing::post};

use crate::auth::guards::{allow_authenticated, allow_org_admin};
use crate::state::AppState;

pub fn class_routes(app_state: AppState) -> Router<AppState> {
    Router::new().route(
        "/",
        post(post::create_class)
            .route_layer(from_fn_with_state(app_state.clone(), allow_org_admin))
            .get(get::list_classes)
            .route_layer(from_fn_with_state(app_state, allow_authenticated)),
    )
}
