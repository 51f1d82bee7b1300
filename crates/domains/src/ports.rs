//! # Core Traits (Ports)
//!
//! Persistence and credential-hashing contracts. Adapters implement these;
//! services only ever see the traits. With the `testing` feature (or in
//! unit tests) mockall generates a `MockXxx` for each.

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{Comment, NewComment, NewPost, NewUser, Post, User};
use crate::paging::{Page, PageRequest};
use crate::search::PostSearchCondition;

/// Account persistence contract.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Inserts a new account. Translates a unique-key conflict on email
    /// into [`crate::BoardError::DuplicateEmail`].
    async fn insert(&self, user: NewUser) -> Result<User>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn exists_by_email(&self, email: &str) -> Result<bool>;
    async fn find_by_id(&self, id: i64) -> Result<Option<User>>;
}

/// Post persistence contract.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait PostRepo: Send + Sync {
    async fn insert(&self, post: NewPost) -> Result<Post>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>>;
    async fn exists(&self, id: i64) -> Result<bool>;
    /// Writes back a loaded entity, bumping `updated_at`.
    async fn update(&self, post: &Post) -> Result<()>;
    async fn delete(&self, id: i64) -> Result<()>;
    /// Paged, sorted query over the dynamic search condition.
    async fn search(
        &self,
        condition: &PostSearchCondition,
        page: &PageRequest,
    ) -> Result<Page<Post>>;
}

/// Comment persistence contract. Compound-key operations treat a post-id
/// mismatch exactly like an absent row.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait CommentRepo: Send + Sync {
    async fn insert(&self, comment: NewComment) -> Result<Comment>;
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>>;
    async fn exists_in_post(&self, id: i64, post_id: i64) -> Result<bool>;
    async fn update(&self, comment: &Comment) -> Result<()>;
    async fn delete_in_post(&self, id: i64, post_id: i64) -> Result<()>;
    async fn page_for_post(&self, post_id: i64, page: &PageRequest) -> Result<Page<Comment>>;
}

/// One-way credential hashing contract.
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password into a self-describing storable string.
    fn hash(&self, plain: &str) -> Result<String>;
    /// Verifies a plaintext candidate against a stored hash. `Ok(false)` on
    /// mismatch; `Err` only when the stored hash is unusable.
    fn verify(&self, plain: &str, hash: &str) -> Result<bool>;
}
