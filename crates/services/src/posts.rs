//! Post read and mutation services.

use std::sync::Arc;

use domains::{
    BoardError, NewPost, Page, PageRequest, Post, PostRepo, PostSearchCondition, Result,
};

/// Read side: single lookup and the paged search.
#[derive(Clone)]
pub struct PostQueryService {
    posts: Arc<dyn PostRepo>,
}

impl PostQueryService {
    pub fn new(posts: Arc<dyn PostRepo>) -> Self {
        Self { posts }
    }

    pub async fn get(&self, id: i64) -> Result<Post> {
        self.posts
            .find_by_id(id)
            .await?
            .ok_or(BoardError::PostNotFound)
    }

    /// Paged search. The requested size is clamped before it reaches the
    /// store, so response cost stays bounded whatever the client asks for.
    pub async fn list(
        &self,
        condition: &PostSearchCondition,
        page: PageRequest,
    ) -> Result<Page<Post>> {
        let page = page.clamped();
        self.posts.search(condition, &page).await
    }
}

/// Write side: create, update, delete.
#[derive(Clone)]
pub struct PostCommandService {
    posts: Arc<dyn PostRepo>,
}

impl PostCommandService {
    pub fn new(posts: Arc<dyn PostRepo>) -> Self {
        Self { posts }
    }

    pub async fn create(&self, title: String, content: String) -> Result<i64> {
        let post = self.posts.insert(NewPost { title, content }).await?;
        tracing::info!(post_id = post.id, "post created");
        Ok(post.id)
    }

    /// Load, mutate, write back. The write is issued explicitly; nothing
    /// relies on an implicit flush.
    pub async fn update(&self, id: i64, title: String, content: String) -> Result<()> {
        let mut post = self
            .posts
            .find_by_id(id)
            .await?
            .ok_or(BoardError::PostNotFound)?;
        post.edit(title, content);
        self.posts.update(&post).await
    }

    /// Existence is checked up front, so deleting a missing post is a typed
    /// not-found rather than an inferred storage failure.
    pub async fn delete(&self, id: i64) -> Result<()> {
        if !self.posts.exists(id).await? {
            return Err(BoardError::PostNotFound);
        }
        self.posts.delete(id).await
    }
}
