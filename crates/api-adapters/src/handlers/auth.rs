//! `/api/auth`: signup, login, logout and the session-identity probe.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tower_sessions::Session;

use crate::dto::{AuthRequest, MeResponse};
use crate::error::ApiError;
use crate::extract::{CurrentUser, ValidatedJson, SESSION_USER_KEY};
use crate::state::AppState;

pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<AuthRequest>,
) -> Result<StatusCode, ApiError> {
    state.auth.signup(&req.email, &req.password).await?;
    Ok(StatusCode::CREATED)
}

/// On success the identity is bound to the server-side session; the client
/// only ever holds the opaque session cookie.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ValidatedJson(req): ValidatedJson<AuthRequest>,
) -> Result<StatusCode, ApiError> {
    let identity = state.auth.login(&req.email, &req.password).await?;
    session
        .insert(SESSION_USER_KEY, identity)
        .await
        .map_err(ApiError::session)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Idempotent: flushing an absent session is still a 204.
pub async fn logout(session: Session) -> Result<StatusCode, ApiError> {
    session.flush().await.map_err(ApiError::session)?;
    Ok(StatusCode::NO_CONTENT)
}

/// A session whose user id no longer resolves (stale session) is treated
/// exactly like no session at all.
pub async fn me(
    State(state): State<AppState>,
    user: CurrentUser,
) -> Result<Json<MeResponse>, ApiError> {
    let account = state
        .auth
        .current_user(user.id())
        .await?
        .ok_or_else(ApiError::unauthorized)?;
    Ok(Json(MeResponse::from(account)))
}
