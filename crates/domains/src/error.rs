//! Centralized error taxonomy for the board.
//!
//! Every variant carries a stable machine-readable code that the HTTP layer
//! maps to a status and a uniform error envelope. Services raise these and
//! never reinterpret lower-layer failures, except for translating row
//! absence into the typed not-found variants.

use thiserror::Error;

/// A single offending field in a rejected request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// The primary error type for all board operations.
#[derive(Debug, Error)]
pub enum BoardError {
    /// Signup with an email that already has an account.
    #[error("an account already exists for this email")]
    DuplicateEmail,

    /// Unknown email or non-matching password. Deliberately a single
    /// variant so callers cannot tell which check failed.
    #[error("email or password is incorrect")]
    BadCredentials,

    /// Request input failed validation; lists every offending field.
    #[error("request validation failed")]
    Validation(Vec<FieldViolation>),

    /// No (or stale) session on a protected operation.
    #[error("authentication required")]
    Unauthorized,

    /// Valid session, insufficient role.
    #[error("permission denied")]
    Forbidden,

    #[error("post not found")]
    PostNotFound,

    /// Also raised when a comment exists but belongs to a different post.
    #[error("comment not found")]
    CommentNotFound,

    /// Infrastructure failure. Rendered as a generic 500; the source only
    /// goes to the log.
    #[error("storage failure")]
    Storage(#[source] anyhow::Error),
}

impl BoardError {
    /// Stable machine-readable code, suitable for client branching.
    pub fn code(&self) -> &'static str {
        match self {
            BoardError::DuplicateEmail => "DUPLICATE_EMAIL",
            BoardError::BadCredentials => "BAD_VALUE_OF_EMAIL_OR_PASSWORD",
            BoardError::Validation(_) => "VALIDATION_ERROR",
            BoardError::Unauthorized => "UNAUTHORIZED",
            BoardError::Forbidden => "FORBIDDEN",
            BoardError::PostNotFound => "POST_NOT_FOUND",
            BoardError::CommentNotFound => "COMMENT_NOT_FOUND",
            BoardError::Storage(_) => "INTERNAL_ERROR",
        }
    }

    pub fn storage(err: impl Into<anyhow::Error>) -> Self {
        BoardError::Storage(err.into())
    }

    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            BoardError::Validation(violations) => violations,
            _ => &[],
        }
    }
}

/// A specialized Result type for board logic.
pub type Result<T> = std::result::Result<T, BoardError>;
