//! Comment services, scoped to their parent post.
//!
//! Every compound-key operation verifies the comment actually belongs to
//! the path-specified post; a mismatch is reported as not-found, never as
//! forbidden, so callers learn nothing about other posts' comments.

use std::sync::Arc;

use domains::{
    BoardError, Comment, CommentRepo, NewComment, Page, PageRequest, PostRepo, Result,
};

#[derive(Clone)]
pub struct CommentQueryService {
    comments: Arc<dyn CommentRepo>,
}

impl CommentQueryService {
    pub fn new(comments: Arc<dyn CommentRepo>) -> Self {
        Self { comments }
    }

    pub async fn list(&self, post_id: i64, page: PageRequest) -> Result<Page<Comment>> {
        let page = page.clamped();
        self.comments.page_for_post(post_id, &page).await
    }
}

#[derive(Clone)]
pub struct CommentCommandService {
    posts: Arc<dyn PostRepo>,
    comments: Arc<dyn CommentRepo>,
}

impl CommentCommandService {
    pub fn new(posts: Arc<dyn PostRepo>, comments: Arc<dyn CommentRepo>) -> Self {
        Self { posts, comments }
    }

    pub async fn create(&self, post_id: i64, content: String) -> Result<Comment> {
        if !self.posts.exists(post_id).await? {
            return Err(BoardError::PostNotFound);
        }
        let comment = self.comments.insert(NewComment { post_id, content }).await?;
        tracing::info!(comment_id = comment.id, post_id, "comment created");
        Ok(comment)
    }

    pub async fn update(&self, post_id: i64, comment_id: i64, content: String) -> Result<Comment> {
        if !self.comments.exists_in_post(comment_id, post_id).await? {
            return Err(BoardError::CommentNotFound);
        }
        let mut comment = self
            .comments
            .find_by_id(comment_id)
            .await?
            .ok_or(BoardError::CommentNotFound)?;
        comment.edit(content);
        self.comments.update(&comment).await?;
        Ok(comment)
    }

    pub async fn delete(&self, post_id: i64, comment_id: i64) -> Result<()> {
        if !self.comments.exists_in_post(comment_id, post_id).await? {
            return Err(BoardError::CommentNotFound);
        }
        self.comments.delete_in_post(comment_id, post_id).await
    }
}
