//! `/api/posts/{postId}/comments`: comments scoped to their parent post.
//!
//! A `(postId, commentId)` pair that does not match a stored comment's
//! parent is answered with 404, indistinguishable from a missing comment.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use crate::dto::{
    CommentCreateRequest, CommentListParams, CommentResponse, CommentUpdateRequest, PageBody,
};
use crate::error::ApiError;
use crate::extract::{ApiPath, CurrentUser, ValidQuery, ValidatedJson};
use crate::state::AppState;

pub async fn list(
    State(state): State<AppState>,
    ApiPath(post_id): ApiPath<i64>,
    ValidQuery(params): ValidQuery<CommentListParams>,
) -> Result<Json<PageBody<CommentResponse>>, ApiError> {
    let page = state
        .comment_queries
        .list(post_id, params.page_request())
        .await?;
    Ok(Json(PageBody::from_page(page)))
}

pub async fn create(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(post_id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<CommentCreateRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let comment = state.comment_commands.create(post_id, req.content).await?;
    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

pub async fn update(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath((post_id, comment_id)): ApiPath<(i64, i64)>,
    ValidatedJson(req): ValidatedJson<CommentUpdateRequest>,
) -> Result<Json<CommentResponse>, ApiError> {
    let comment = state
        .comment_commands
        .update(post_id, comment_id, req.content)
        .await?;
    Ok(Json(CommentResponse::from(comment)))
}

pub async fn remove(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath((post_id, comment_id)): ApiPath<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    state.comment_commands.delete(post_id, comment_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
