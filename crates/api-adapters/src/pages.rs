//! Stub pages for the board's browser surface.
//!
//! Rendering proper is out of scope; each route answers with a static page
//! identifier so the route table stays complete and testable.

use axum::response::Html;
use axum::routing::get;
use axum::Router;

use crate::state::AppState;

async fn home() -> Html<&'static str> {
    Html("home")
}

async fn login() -> Html<&'static str> {
    Html("login")
}

async fn signup() -> Html<&'static str> {
    Html("signup")
}

async fn me() -> Html<&'static str> {
    Html("auth-me")
}

async fn post_list() -> Html<&'static str> {
    Html("post-list")
}

async fn post_new() -> Html<&'static str> {
    Html("post-new")
}

async fn post_detail() -> Html<&'static str> {
    Html("post-detail")
}

async fn post_edit() -> Html<&'static str> {
    Html("post-edit")
}

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/home", get(home))
        .route("/login", get(login))
        .route("/signup", get(signup))
        .route("/me", get(me))
        .route("/posts", get(post_list))
        .route("/posts/new", get(post_new))
        .route("/posts/{post_id}", get(post_detail))
        .route("/posts/{post_id}/edit", get(post_edit))
}
