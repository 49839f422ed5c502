use crate::auth::claims::AuthUser;
use crate::response::ApiResponse;
use crate::state::AppState;
use axum::{
    Json,
    body::Body,
    extract::{FromRequestParts, State},
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use db::models::user::{self, Role};

#[derive(serde::Serialize, Default)]
pub struct Empty;

/// The account a guard resolved for the request, inserted into extensions
/// for handlers to pick up via `Extension<CurrentUser>`.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub user::Model);

/// Extracts and validates the token, then re-loads the account so a deleted
/// or deactivated subject fails authentication even with a live token.
async fn authenticate(
    app_state: &AppState,
    mut req: Request<Body>,
) -> Result<(Request<Body>, user::Model), (StatusCode, Json<ApiResponse<Empty>>)> {
    let (mut parts, body) = req.into_parts();
    let auth = AuthUser::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            (
                StatusCode::UNAUTHORIZED,
                Json(ApiResponse::error("Authentication required")),
            )
        })?;
    req = Request::from_parts(parts, body);

    let account = user::Model::find_by_id(app_state.db(), auth.0.sub)
        .await
        .map_err(|e| {
            tracing::warn!(error = %e, user_id = auth.0.sub, "DB error while loading account; denying access");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error("A database error occurred")),
            )
        })?
        .filter(|u| u.is_active)
        .ok_or((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::error("Authentication required")),
        ))?;

    req.extensions_mut().insert(auth);
    req.extensions_mut().insert(CurrentUser(account.clone()));
    Ok((req, account))
}

/// Base role guard other guards build upon. Authorization is independent of
/// resource existence: a wrong role gets 403 before any lookup happens.
async fn allow_roles(
    app_state: AppState,
    req: Request<Body>,
    next: Next,
    allowed: &[Role],
    failure_msg: &str,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, account) = authenticate(&app_state, req).await?;

    if allowed.contains(&account.role) {
        Ok(next.run(req).await)
    } else {
        Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::error(failure_msg)),
        ))
    }
}

/// Any active account.
pub async fn allow_authenticated(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    let (req, _account) = authenticate(&app_state, req).await?;
    Ok(next.run(req).await)
}

pub async fn allow_org_owner(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_roles(
        app_state,
        req,
        next,
        &[Role::OrgOwner],
        "Organization owner access required",
    )
    .await
}

pub async fn allow_org_admin(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_roles(
        app_state,
        req,
        next,
        &[Role::OrgAdmin],
        "Organization admin access required",
    )
    .await
}

/// Account registration is an owner or admin operation.
pub async fn allow_registrars(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_roles(
        app_state,
        req,
        next,
        &[Role::OrgOwner, Role::OrgAdmin],
        "Organization owner or admin access required",
    )
    .await
}

/// Class owner or class assistant.
pub async fn allow_teachers(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_roles(
        app_state,
        req,
        next,
        &[Role::ClassOwner, Role::ClassAssistant],
        "Teaching staff access required",
    )
    .await
}

pub async fn allow_class_owner(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_roles(
        app_state,
        req,
        next,
        &[Role::ClassOwner],
        "Class owner access required",
    )
    .await
}

pub async fn allow_learner(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_roles(
        app_state,
        req,
        next,
        &[Role::Learner],
        "Student access required",
    )
    .await
}

/// Teaching staff plus org admins can read attendance reports.
pub async fn allow_report_viewers(
    State(app_state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, Json<ApiResponse<Empty>>)> {
    allow_roles(
        app_state,
        req,
        next,
        &[Role::ClassOwner, Role::ClassAssistant, Role::OrgAdmin],
        "Teaching staff or admin access required",
    )
    .await
}
