//! `/api/posts`: CRUD plus the paged dynamic search.
//!
//! Reads are public; mutations require the session identity. Posts carry
//! no author, so any authenticated caller may edit or delete any post.

use axum::extract::State;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use crate::dto::{PageBody, PostCreateRequest, PostListParams, PostResponse, PostUpdateRequest};
use crate::error::ApiError;
use crate::extract::{ApiPath, CurrentUser, ValidQuery, ValidatedJson};
use crate::state::AppState;

pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    ValidatedJson(req): ValidatedJson<PostCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let id = state.post_commands.create(req.title, req.content).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, format!("/api/posts/{id}"))],
    ))
}

pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<PostResponse>, ApiError> {
    let post = state.post_queries.get(id).await?;
    Ok(Json(PostResponse::from(post)))
}

pub async fn list(
    State(state): State<AppState>,
    ValidQuery(params): ValidQuery<PostListParams>,
) -> Result<Json<PageBody<PostResponse>>, ApiError> {
    let condition = params.condition();
    let page = state
        .post_queries
        .list(&condition, params.page_request())
        .await?;
    Ok(Json(PageBody::from_page(page)))
}

pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<PostUpdateRequest>,
) -> Result<StatusCode, ApiError> {
    state.post_commands.update(id, req.title, req.content).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<StatusCode, ApiError> {
    state.post_commands.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
