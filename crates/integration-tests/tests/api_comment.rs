//! Comment flows: scoping to the parent post, compound-key checks, paging.

use axum::http::StatusCode;
use integration_tests::{
    app, body_json, create_post, empty_request, json_request, login_session, send, with_session,
};
use serde_json::json;

async fn create_comment(
    app: &axum::Router,
    cookie: &str,
    post_id: i64,
    content: &str,
) -> serde_json::Value {
    let res = send(
        app,
        with_session(
            json_request(
                "POST",
                &format!("/api/posts/{post_id}/comments"),
                json!({ "content": content }),
            ),
            cookie,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::CREATED);
    body_json(res).await
}

#[tokio::test]
async fn comments_are_scoped_to_their_post() {
    let app = app();
    let cookie = login_session(&app, "commenter@example.com").await;
    let post_a = create_post(&app, &cookie, "A", "first").await;
    let post_b = create_post(&app, &cookie, "B", "second").await;

    let created = create_comment(&app, &cookie, post_a, "only on A").await;
    assert_eq!(created["postId"], post_a);

    let res = send(
        &app,
        empty_request("GET", &format!("/api/posts/{post_b}/comments")),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["totalElements"], 0);
    assert!(body["content"].as_array().unwrap().is_empty());

    let res = send(
        &app,
        empty_request("GET", &format!("/api/posts/{post_a}/comments")),
    )
    .await;
    let body = body_json(res).await;
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["content"][0]["postId"], post_a);
    assert_eq!(body["content"][0]["content"], "only on A");
}

#[tokio::test]
async fn commenting_on_a_missing_post_is_not_found() {
    let app = app();
    let cookie = login_session(&app, "commenter@example.com").await;
    let res = send(
        &app,
        with_session(
            json_request("POST", "/api/posts/4040/comments", json!({ "content": "hi" })),
            &cookie,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["code"], "POST_NOT_FOUND");
}

#[tokio::test]
async fn blank_comment_content_is_a_field_violation() {
    let app = app();
    let cookie = login_session(&app, "commenter@example.com").await;
    let post = create_post(&app, &cookie, "A", "body").await;

    let res = send(
        &app,
        with_session(
            json_request(
                "POST",
                &format!("/api/posts/{post}/comments"),
                json!({ "content": "   " }),
            ),
            &cookie,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let violations = body["fieldViolations"].as_array().unwrap();
    assert!(violations.iter().any(|v| v["field"] == "content"));
}

#[tokio::test]
async fn deleting_under_the_wrong_post_is_not_found_and_keeps_the_comment() {
    let app = app();
    let cookie = login_session(&app, "commenter@example.com").await;
    let post_a = create_post(&app, &cookie, "A", "first").await;
    let post_b = create_post(&app, &cookie, "B", "second").await;
    let comment = create_comment(&app, &cookie, post_a, "keep me").await;
    let comment_id = comment["id"].as_i64().unwrap();

    let res = send(
        &app,
        with_session(
            empty_request(
                "DELETE",
                &format!("/api/posts/{post_b}/comments/{comment_id}"),
            ),
            &cookie,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["code"], "COMMENT_NOT_FOUND");

    let res = send(
        &app,
        empty_request("GET", &format!("/api/posts/{post_a}/comments")),
    )
    .await;
    assert_eq!(body_json(res).await["totalElements"], 1);
}

#[tokio::test]
async fn updating_under_the_wrong_post_is_not_found() {
    let app = app();
    let cookie = login_session(&app, "commenter@example.com").await;
    let post_a = create_post(&app, &cookie, "A", "first").await;
    let post_b = create_post(&app, &cookie, "B", "second").await;
    let comment = create_comment(&app, &cookie, post_a, "original").await;
    let comment_id = comment["id"].as_i64().unwrap();

    let res = send(
        &app,
        with_session(
            json_request(
                "PUT",
                &format!("/api/posts/{post_b}/comments/{comment_id}"),
                json!({ "content": "hijacked" }),
            ),
            &cookie,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["code"], "COMMENT_NOT_FOUND");
}

#[tokio::test]
async fn update_replaces_content_in_place() {
    let app = app();
    let cookie = login_session(&app, "commenter@example.com").await;
    let post = create_post(&app, &cookie, "A", "body").await;
    let comment = create_comment(&app, &cookie, post, "first draft").await;
    let comment_id = comment["id"].as_i64().unwrap();

    let res = send(
        &app,
        with_session(
            json_request(
                "PUT",
                &format!("/api/posts/{post}/comments/{comment_id}"),
                json!({ "content": "final" }),
            ),
            &cookie,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["id"], comment_id);
    assert_eq!(body["postId"], post);
    assert_eq!(body["content"], "final");
}

#[tokio::test]
async fn delete_removes_the_comment() {
    let app = app();
    let cookie = login_session(&app, "commenter@example.com").await;
    let post = create_post(&app, &cookie, "A", "body").await;
    let comment = create_comment(&app, &cookie, post, "gone soon").await;
    let comment_id = comment["id"].as_i64().unwrap();

    let res = send(
        &app,
        with_session(
            empty_request("DELETE", &format!("/api/posts/{post}/comments/{comment_id}")),
            &cookie,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = send(
        &app,
        empty_request("GET", &format!("/api/posts/{post}/comments")),
    )
    .await;
    assert_eq!(body_json(res).await["totalElements"], 0);

    let res = send(
        &app,
        with_session(
            empty_request("DELETE", &format!("/api/posts/{post}/comments/{comment_id}")),
            &cookie,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn comment_mutations_require_authentication() {
    let app = app();
    let cookie = login_session(&app, "commenter@example.com").await;
    let post = create_post(&app, &cookie, "A", "body").await;

    let res = send(
        &app,
        json_request(
            "POST",
            &format!("/api/posts/{post}/comments"),
            json!({ "content": "anon" }),
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(res).await["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn comment_listing_pages_newest_first() {
    let app = app();
    let cookie = login_session(&app, "commenter@example.com").await;
    let post = create_post(&app, &cookie, "A", "body").await;
    let first = create_comment(&app, &cookie, post, "c1").await["id"]
        .as_i64()
        .unwrap();
    let second = create_comment(&app, &cookie, post, "c2").await["id"]
        .as_i64()
        .unwrap();
    let third = create_comment(&app, &cookie, post, "c3").await["id"]
        .as_i64()
        .unwrap();

    let res = send(
        &app,
        empty_request("GET", &format!("/api/posts/{post}/comments?size=2")),
    )
    .await;
    let body = body_json(res).await;
    assert_eq!(body["totalElements"], 3);
    assert_eq!(body["totalPages"], 2);
    let ids: Vec<i64> = body["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![third, second]);

    let res = send(
        &app,
        empty_request("GET", &format!("/api/posts/{post}/comments?size=2&page=1")),
    )
    .await;
    let body = body_json(res).await;
    assert_eq!(body["content"][0]["id"], first);
}
