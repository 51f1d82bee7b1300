//! Route table and middleware stack.

use axum::routing::{get, post, put};
use axum::{middleware, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::error::render_error_envelope;
use crate::handlers::{auth, comments, posts};
use crate::pages;
use crate::state::AppState;

/// Assembles the full application: API routes, page stubs, sessions,
/// error-envelope rendering, tracing, request ids and CORS.
pub fn router(state: AppState) -> Router {
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store).with_secure(false);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
        .route("/api/posts", get(posts::list).post(posts::create))
        .route(
            "/api/posts/{post_id}",
            get(posts::get).put(posts::update).delete(posts::remove),
        )
        .route(
            "/api/posts/{post_id}/comments",
            get(comments::list).post(comments::create),
        )
        .route(
            "/api/posts/{post_id}/comments/{comment_id}",
            put(comments::update).delete(comments::remove),
        )
        .merge(pages::routes())
        .with_state(state)
        .layer(session_layer)
        .layer(middleware::from_fn(render_error_envelope))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
