//! Storage adapters for the domain repository ports.
//!
//! `memory` is always available and backs the API tests and local
//! experimentation; `postgres` (feature `db-postgres`) is the production
//! store, with embedded sqlx migrations.

pub mod memory;

#[cfg(feature = "db-postgres")]
pub mod postgres;

pub use memory::{MemoryCommentRepo, MemoryPostRepo, MemoryUserRepo};
