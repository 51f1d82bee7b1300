//! # Domain Models
//!
//! Core entities of the board. Identifiers are store-assigned `i64`s;
//! timestamps are stamped by the repository on insert/update so that every
//! adapter audits the same way.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed role set. Stored as TEXT in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "USER",
            UserRole::Admin => "ADMIN",
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USER" => Ok(UserRole::User),
            "ADMIN" => Ok(UserRole::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

/// A registered account. `password_hash` is a PHC-format string; the
/// plaintext never reaches this type.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for [`User`]; the store assigns id and created_at.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub role: UserRole,
}

/// The identity bound to a server-side session between login and logout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: i64,
    pub role: UserRole,
}

/// A board post. Carries no author link: any authenticated account may
/// mutate any post.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// In-place edit; `updated_at` is bumped by the repository when the
    /// entity is written back.
    pub fn edit(&mut self, title: String, content: String) {
        self.title = title;
        self.content = content;
    }
}

#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

/// A comment, valid only in the context of its owning post.
#[derive(Debug, Clone)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Comment {
    pub fn edit(&mut self, content: String) {
        self.content = content;
    }
}

#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub content: String,
}
