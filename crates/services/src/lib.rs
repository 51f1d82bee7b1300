//! Application services for the board.
//!
//! Pure orchestration over the domain ports: no framework types, no storage
//! details. The HTTP layer resolves the caller's identity and passes it (or
//! just the extracted arguments) explicitly into these services.

pub mod auth;
pub mod comments;
pub mod posts;

pub use auth::AuthService;
pub use comments::{CommentCommandService, CommentQueryService};
pub use posts::{PostCommandService, PostQueryService};
