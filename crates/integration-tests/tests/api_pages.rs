//! The stub browser pages answer with their static identifiers.

use axum::http::StatusCode;
use integration_tests::{app, body_text, empty_request, send};

#[tokio::test]
async fn page_stubs_are_reachable() {
    let app = app();
    for (uri, identifier) in [
        ("/", "home"),
        ("/home", "home"),
        ("/login", "login"),
        ("/signup", "signup"),
        ("/me", "auth-me"),
        ("/posts", "post-list"),
        ("/posts/new", "post-new"),
        ("/posts/7", "post-detail"),
        ("/posts/7/edit", "post-edit"),
    ] {
        let res = send(&app, empty_request("GET", uri)).await;
        assert_eq!(res.status(), StatusCode::OK, "page {uri}");
        assert_eq!(body_text(res).await, identifier, "page {uri}");
    }
}
