//! Shared fixtures for the API-level tests.
//!
//! Builds the full router over the in-memory adapters and provides small
//! request/response helpers so the test files read as scenarios.

#![cfg(feature = "web-axum")]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;

use api_adapters::AppState;
use domains::{PasswordHasher, Result};
use services::{
    AuthService, CommentCommandService, CommentQueryService, PostCommandService, PostQueryService,
};
use storage_adapters::{MemoryCommentRepo, MemoryPostRepo, MemoryUserRepo};

/// Deliberately cheap hasher for these suites; the real Argon2 adapter is
/// covered by its own unit tests and would dominate the runtime here.
pub struct PlainTextHasher;

impl PasswordHasher for PlainTextHasher {
    fn hash(&self, plain: &str) -> Result<String> {
        Ok(format!("plain${plain}"))
    }

    fn verify(&self, plain: &str, hash: &str) -> Result<bool> {
        Ok(hash == format!("plain${plain}"))
    }
}

/// A fresh application over empty in-memory stores.
pub fn app() -> Router {
    let users = Arc::new(MemoryUserRepo::new());
    let posts = Arc::new(MemoryPostRepo::new());
    let comments = Arc::new(MemoryCommentRepo::new());
    let hasher = Arc::new(PlainTextHasher);

    let state = AppState {
        auth: AuthService::new(users, hasher),
        post_queries: PostQueryService::new(posts.clone()),
        post_commands: PostCommandService::new(posts.clone()),
        comment_queries: CommentQueryService::new(comments.clone()),
        comment_commands: CommentCommandService::new(posts, comments),
    };
    api_adapters::router(state)
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn with_session(mut req: Request<Body>, cookie: &str) -> Request<Body> {
    req.headers_mut()
        .insert(header::COOKIE, cookie.parse().unwrap());
    req
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_json(res: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_text(res: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// The session cookie pair (`name=value`) from a Set-Cookie response.
pub fn session_cookie(res: &Response<Body>) -> String {
    res.headers()
        .get(header::SET_COOKIE)
        .expect("response must set a session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_owned()
}

/// Signs `email` up and logs in, returning the cookie to replay.
pub async fn login_session(app: &Router, email: &str) -> String {
    let creds = serde_json::json!({ "email": email, "password": "password123!" });
    let res = send(app, json_request("POST", "/api/auth/signup", creds.clone())).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let res = send(app, json_request("POST", "/api/auth/login", creds)).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    session_cookie(&res)
}

/// Creates a post through the API and returns its id from the Location
/// header.
pub async fn create_post(app: &Router, cookie: &str, title: &str, content: &str) -> i64 {
    let res = send(
        app,
        with_session(
            json_request(
                "POST",
                "/api/posts",
                serde_json::json!({ "title": title, "content": content }),
            ),
            cookie,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let location = res
        .headers()
        .get(header::LOCATION)
        .expect("created post must carry a Location header")
        .to_str()
        .unwrap();
    location.rsplit('/').next().unwrap().parse().unwrap()
}
