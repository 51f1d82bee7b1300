//! Route handlers, grouped by resource.

pub mod auth;
pub mod comments;
pub mod posts;
