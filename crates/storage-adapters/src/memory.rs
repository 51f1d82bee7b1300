//! In-memory repository implementations.
//!
//! Concurrent maps keyed by id plus an atomic id sequence. These mirror the
//! Postgres adapter's observable behavior (auditing timestamps, duplicate
//! translation, sort order) so tests exercising them see the same contract.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use domains::{
    BoardError, Comment, CommentRepo, NewComment, NewPost, NewUser, Page, PageRequest, Post,
    PostRepo, PostSearchCondition, Result, SortDirection, User, UserRepo,
};

fn slice_page<T: Clone>(sorted: Vec<T>, page: &PageRequest) -> Page<T> {
    let total = sorted.len() as u64;
    let content = sorted
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.size as usize)
        .collect();
    Page::new(content, total, page)
}

#[derive(Default)]
pub struct MemoryUserRepo {
    seq: AtomicI64,
    rows: DashMap<i64, User>,
}

impl MemoryUserRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepo for MemoryUserRepo {
    async fn insert(&self, user: NewUser) -> Result<User> {
        if self.rows.iter().any(|row| row.email == user.email) {
            return Err(BoardError::DuplicateEmail);
        }
        let id = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let stored = User {
            id,
            email: user.email,
            password_hash: user.password_hash,
            role: user.role,
            created_at: Utc::now(),
        };
        self.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        Ok(self
            .rows
            .iter()
            .find(|row| row.email == email)
            .map(|row| row.value().clone()))
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool> {
        Ok(self.rows.iter().any(|row| row.email == email))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<User>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }
}

#[derive(Default)]
pub struct MemoryPostRepo {
    seq: AtomicI64,
    rows: DashMap<i64, Post>,
}

impl MemoryPostRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepo for MemoryPostRepo {
    async fn insert(&self, post: NewPost) -> Result<Post> {
        let id = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let now = Utc::now();
        let stored = Post {
            id,
            title: post.title,
            content: post.content,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    async fn exists(&self, id: i64) -> Result<bool> {
        Ok(self.rows.contains_key(&id))
    }

    async fn update(&self, post: &Post) -> Result<()> {
        let mut stored = post.clone();
        stored.updated_at = Utc::now();
        self.rows.insert(stored.id, stored);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<()> {
        self.rows.remove(&id);
        Ok(())
    }

    async fn search(
        &self,
        condition: &PostSearchCondition,
        page: &PageRequest,
    ) -> Result<Page<Post>> {
        let mut hits: Vec<Post> = self
            .rows
            .iter()
            .filter(|row| condition.matches(row.value()))
            .map(|row| row.value().clone())
            .collect();
        // created_at with id as tiebreak, so pages are stable when several
        // posts land on the same timestamp
        hits.sort_by(|a, b| match page.direction {
            SortDirection::Asc => (a.created_at, a.id).cmp(&(b.created_at, b.id)),
            SortDirection::Desc => (b.created_at, b.id).cmp(&(a.created_at, a.id)),
        });
        Ok(slice_page(hits, page))
    }
}

#[derive(Default)]
pub struct MemoryCommentRepo {
    seq: AtomicI64,
    rows: DashMap<i64, Comment>,
}

impl MemoryCommentRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CommentRepo for MemoryCommentRepo {
    async fn insert(&self, comment: NewComment) -> Result<Comment> {
        let id = self.seq.fetch_add(1, Ordering::Relaxed) + 1;
        let now = Utc::now();
        let stored = Comment {
            id,
            post_id: comment.post_id,
            content: comment.content,
            created_at: now,
            updated_at: now,
        };
        self.rows.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>> {
        Ok(self.rows.get(&id).map(|row| row.value().clone()))
    }

    async fn exists_in_post(&self, id: i64, post_id: i64) -> Result<bool> {
        Ok(self
            .rows
            .get(&id)
            .map(|row| row.post_id == post_id)
            .unwrap_or(false))
    }

    async fn update(&self, comment: &Comment) -> Result<()> {
        let mut stored = comment.clone();
        stored.updated_at = Utc::now();
        self.rows.insert(stored.id, stored);
        Ok(())
    }

    async fn delete_in_post(&self, id: i64, post_id: i64) -> Result<()> {
        self.rows.remove_if(&id, |_, row| row.post_id == post_id);
        Ok(())
    }

    async fn page_for_post(&self, post_id: i64, page: &PageRequest) -> Result<Page<Comment>> {
        let mut hits: Vec<Comment> = self
            .rows
            .iter()
            .filter(|row| row.post_id == post_id)
            .map(|row| row.value().clone())
            .collect();
        hits.sort_by(|a, b| match page.direction {
            SortDirection::Asc => (a.created_at, a.id).cmp(&(b.created_at, b.id)),
            SortDirection::Desc => (b.created_at, b.id).cmp(&(a.created_at, a.id)),
        });
        Ok(slice_page(hits, page))
    }
}
