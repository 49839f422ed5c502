//! Routes for the `/auth` endpoint group.
//!
//! - `POST /auth/register` — create an account (owner/admin only)
//! - `POST /auth/login` — staff password login
//! - `POST /auth/student-login` — learner login by roll number + email
//! - `GET /auth/me` — current account from token

pub mod get;
pub mod post;

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};

use crate::auth::guards::{allow_authenticated, allow_registrars};
use crate::state::AppState;

pub fn auth_routes(app_state: AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/register",
            post(post::register)
                .route_layer(from_fn_with_state(app_state.clone(), allow_registrars)),
        )
        .route("/login", post(post::login))
        .route("/student-login", post(post::student_login))
        .route(
            "/me",
            get(get::me).route_layer(from_fn_with_state(app_state, allow_authenticated)),
        )
}
