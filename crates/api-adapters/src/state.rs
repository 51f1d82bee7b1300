//! Shared handler state: one instance of every application service.

use services::{
    AuthService, CommentCommandService, CommentQueryService, PostCommandService, PostQueryService,
};

/// Cloned per request by axum; the services themselves are cheap handles
/// over `Arc`ed ports.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub post_queries: PostQueryService,
    pub post_commands: PostCommandService,
    pub comment_queries: CommentQueryService,
    pub comment_commands: CommentCommandService,
}
