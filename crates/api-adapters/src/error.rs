//! Error rendering: every failure leaves this layer as the same JSON
//! envelope `{code, message, fieldViolations, path, timestamp}`.
//!
//! Handlers and extractors produce an [`ApiError`]; its `IntoResponse`
//! impl records the payload as a response extension, and the
//! [`render_error_envelope`] middleware (which knows the request path)
//! turns that into the final body.

use axum::body::Body;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::Request;
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

use domains::{BoardError, FieldViolation};

/// A failure ready to be rendered. Built from [`BoardError`] (the usual
/// path) or directly by extractors for transport-level rejections.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    message: String,
    violations: Vec<FieldViolation>,
}

impl ApiError {
    pub fn unauthorized() -> Self {
        BoardError::Unauthorized.into()
    }

    pub fn validation(violations: Vec<FieldViolation>) -> Self {
        BoardError::Validation(violations).into()
    }

    pub fn malformed_body(rejection: &JsonRejection) -> Self {
        tracing::debug!(%rejection, "rejecting unreadable request body");
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "VALIDATION_ERROR",
            message: "request body is malformed".to_owned(),
            violations: Vec::new(),
        }
    }

    pub fn bad_query(rejection: &QueryRejection) -> Self {
        tracing::debug!(%rejection, "rejecting invalid query parameters");
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "VALIDATION_ERROR",
            message: "request parameters are invalid".to_owned(),
            violations: Vec::new(),
        }
    }

    pub fn bad_path(rejection: &PathRejection) -> Self {
        tracing::debug!(%rejection, "rejecting invalid path parameters");
        Self {
            status: StatusCode::BAD_REQUEST,
            code: "VALIDATION_ERROR",
            message: "request path is invalid".to_owned(),
            violations: Vec::new(),
        }
    }

    pub fn session(err: tower_sessions::session::Error) -> Self {
        tracing::error!(error = %err, "session store failure");
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            code: "INTERNAL_ERROR",
            message: "an internal error occurred".to_owned(),
            violations: Vec::new(),
        }
    }
}

impl From<BoardError> for ApiError {
    fn from(err: BoardError) -> Self {
        let status = match &err {
            BoardError::DuplicateEmail => StatusCode::CONFLICT,
            BoardError::BadCredentials | BoardError::Unauthorized => StatusCode::UNAUTHORIZED,
            BoardError::Validation(_) => StatusCode::BAD_REQUEST,
            BoardError::Forbidden => StatusCode::FORBIDDEN,
            BoardError::PostNotFound | BoardError::CommentNotFound => StatusCode::NOT_FOUND,
            BoardError::Storage(source) => {
                tracing::error!(error = ?source, "request failed on storage");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        let code = err.code();
        let message = match &err {
            // never leak internal detail to the client
            BoardError::Storage(_) => "an internal error occurred".to_owned(),
            other => other.to_string(),
        };
        let violations = match err {
            BoardError::Validation(violations) => violations,
            _ => Vec::new(),
        };
        Self {
            status,
            code,
            message,
            violations,
        }
    }
}

/// Carried through response extensions to the envelope middleware.
#[derive(Debug, Clone)]
pub struct ErrorPayload {
    pub code: &'static str,
    pub message: String,
    pub violations: Vec<FieldViolation>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut res = self.status.into_response();
        res.extensions_mut().insert(ErrorPayload {
            code: self.code,
            message: self.message,
            violations: self.violations,
        });
        res
    }
}

#[derive(Debug, Serialize)]
pub struct FieldViolationBody {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub field_violations: Vec<FieldViolationBody>,
    pub path: String,
    pub timestamp: DateTime<Utc>,
}

/// Middleware that turns an [`ErrorPayload`] left on the response into the
/// uniform envelope, stamping the request path and time. Non-error
/// responses pass through untouched.
pub async fn render_error_envelope(req: Request, next: Next) -> Response {
    let path = req.uri().path().to_owned();
    let res = next.run(req).await;

    let (mut parts, body) = res.into_parts();
    let Some(payload) = parts.extensions.remove::<ErrorPayload>() else {
        return Response::from_parts(parts, body);
    };

    let envelope = ErrorBody {
        code: payload.code.to_owned(),
        message: payload.message,
        field_violations: payload
            .violations
            .into_iter()
            .map(|v| FieldViolationBody {
                field: v.field,
                message: v.message,
            })
            .collect(),
        path,
        timestamp: Utc::now(),
    };
    let bytes = serde_json::to_vec(&envelope).unwrap_or_default();

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    Response::from_parts(parts, Body::from(bytes))
}

/// Flattens validator output into the envelope's field violations, sorted
/// by field so clients and tests see a deterministic order.
pub fn violations_from(errors: &validator::ValidationErrors) -> Vec<FieldViolation> {
    let mut violations: Vec<FieldViolation> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let message = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                FieldViolation::new(field.to_string(), message)
            })
        })
        .collect();
    violations.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
    violations
}
