//! Routes for the `/students` endpoint group.
//!
//! - `POST /students` — register a learner (class owner only)
//! - `GET /students` — list learners; class owners see their own class,
//!   class assistants see all

pub mod get;
pub mod post;

use axum::{Router, middleware::from_fn_with_state, routing::post};

use crate::auth::guards::{allow_class_owner, allow_teachers};
use crate::state::AppState;

pub fn student_routes(app_state: AppState) -> Router<AppState> {
    Router::new().route(
        "/",
        post(post::add_student)
            .route_layer(from_fn_with_state(app_state.clone(), allow_class_owner))
            .get(get::list_students)
            .route_layer(from_fn_with_state(app_state, allow_teachers)),
    )
}
