use axum::{Extension, Json, http::StatusCode};

use crate::auth::guards::CurrentUser;
use crate::response::ApiResponse;
use crate::routes::common::AccountResponse;

/// GET /auth/me
///
/// Returns the account the presented token resolves to. The guard has
/// already re-loaded it, so this is a pure projection.
pub async fn me(
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> (StatusCode, Json<ApiResponse<AccountResponse>>) {
    (
        StatusCode::OK,
        Json(ApiResponse::success(user.into(), "Current account")),
    )
}
