//! Wire DTOs: request validation profiles and camelCase response shapes.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use domains::{
    Comment, Page, PageRequest, Post, PostSearchCondition, SearchScope, SortDirection, User,
};

/// Default page size for the post listing.
const POSTS_DEFAULT_SIZE: u32 = 5;
/// Default page size for comment listings.
const COMMENTS_DEFAULT_SIZE: u32 = 10;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("must not be blank".into());
        return Err(err);
    }
    Ok(())
}

/// Shared by signup and login.
#[derive(Debug, Deserialize, Validate)]
pub struct AuthRequest {
    #[validate(email(message = "must be a well-formed email address"))]
    pub email: String,
    #[validate(length(min = 8, max = 72, message = "must be between 8 and 72 characters"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i64,
    pub email: String,
    pub role: &'static str,
}

impl From<User> for MeResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role.as_str(),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct PostCreateRequest {
    #[validate(
        custom(function = not_blank),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub title: String,
    #[validate(
        custom(function = not_blank),
        length(max = 2000, message = "must be at most 2000 characters")
    )]
    pub content: String,
}

/// The update profile allows longer content than create; both limits come
/// straight from the original validation rules.
#[derive(Debug, Deserialize, Validate)]
pub struct PostUpdateRequest {
    #[validate(
        custom(function = not_blank),
        length(max = 100, message = "must be at most 100 characters")
    )]
    pub title: String,
    #[validate(
        custom(function = not_blank),
        length(max = 5000, message = "must be at most 5000 characters")
    )]
    pub content: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct CommentCreateRequest {
    #[validate(
        custom(function = not_blank),
        length(max = 1000, message = "must be at most 1000 characters")
    )]
    pub content: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CommentUpdateRequest {
    #[validate(
        custom(function = not_blank),
        length(max = 1000, message = "must be at most 1000 characters")
    )]
    pub content: String,
}

/// Each comment echoes its post id so list items are self-describing.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            post_id: comment.post_id,
            content: comment.content,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Query string of `GET /api/posts`. Timestamps are ISO local date-times,
/// interpreted as UTC.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListParams {
    pub keyword: Option<String>,
    #[serde(rename = "type")]
    pub scope: Option<SearchScope>,
    pub created_from: Option<NaiveDateTime>,
    pub created_to: Option<NaiveDateTime>,
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl PostListParams {
    pub fn condition(&self) -> PostSearchCondition {
        PostSearchCondition {
            keyword: self.keyword.clone(),
            scope: self.scope.unwrap_or_default(),
            created_from: self.created_from.map(|naive| naive.and_utc()),
            created_to: self.created_to.map(|naive| naive.and_utc()),
        }
    }

    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(POSTS_DEFAULT_SIZE),
            parse_sort(self.sort.as_deref()),
        )
    }
}

/// `sort=createdAt,desc` style. The field part is ignored: only
/// `createdAt` is sortable, so anything else falls back to it.
fn parse_sort(sort: Option<&str>) -> SortDirection {
    match sort.and_then(|s| s.split(',').nth(1)).map(str::trim) {
        Some(direction) if direction.eq_ignore_ascii_case("asc") => SortDirection::Asc,
        _ => SortDirection::Desc,
    }
}

#[derive(Debug, Deserialize)]
pub struct CommentListParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
}

impl CommentListParams {
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(
            self.page.unwrap_or(0),
            self.size.unwrap_or(COMMENTS_DEFAULT_SIZE),
            SortDirection::Desc,
        )
    }
}

/// The page envelope for every listing endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageBody<T> {
    pub content: Vec<T>,
    pub total_elements: u64,
    pub total_pages: u32,
    pub page: u32,
    pub size: u32,
}

impl<T> PageBody<T> {
    pub fn from_page<U: Into<T>>(page: Page<U>) -> Self {
        let total_pages = page.total_pages();
        Self {
            content: page.content.into_iter().map(Into::into).collect(),
            total_elements: page.total_elements,
            total_pages,
            page: page.page,
            size: page.size,
        }
    }
}
