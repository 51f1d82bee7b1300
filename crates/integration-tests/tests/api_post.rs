//! Post CRUD, search and paging through the HTTP surface.

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use integration_tests::{
    app, body_json, create_post, empty_request, json_request, login_session, send, with_session,
};
use serde_json::json;

fn timestamp(value: &serde_json::Value) -> DateTime<Utc> {
    value.as_str().unwrap().parse().unwrap()
}

#[tokio::test]
async fn mutations_require_authentication() {
    let app = app();
    let res = send(
        &app,
        json_request("POST", "/api/posts", json!({ "title": "t", "content": "c" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(res).await;
    assert_eq!(body["code"], "UNAUTHORIZED");

    let res = send(
        &app,
        json_request("PUT", "/api/posts/1", json!({ "title": "t", "content": "c" })),
    )
    .await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = send(&app, empty_request("DELETE", "/api/posts/1")).await;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_then_fetch_round_trips() {
    let app = app();
    let cookie = login_session(&app, "author@example.com").await;
    let id = create_post(&app, &cookie, "First post", "Hello board").await;

    let res = send(&app, empty_request("GET", &format!("/api/posts/{id}"))).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["id"], id);
    assert_eq!(body["title"], "First post");
    assert_eq!(body["content"], "Hello board");
    // fresh posts carry identical audit timestamps
    assert_eq!(timestamp(&body["createdAt"]), timestamp(&body["updatedAt"]));
}

#[tokio::test]
async fn update_replaces_fields_and_bumps_updated_at() {
    let app = app();
    let cookie = login_session(&app, "editor@example.com").await;
    let id = create_post(&app, &cookie, "Before", "old content").await;

    let res = send(&app, empty_request("GET", &format!("/api/posts/{id}"))).await;
    let original = body_json(res).await;

    let res = send(
        &app,
        with_session(
            json_request(
                "PUT",
                &format!("/api/posts/{id}"),
                json!({ "title": "After", "content": "new content" }),
            ),
            &cookie,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = send(&app, empty_request("GET", &format!("/api/posts/{id}"))).await;
    let updated = body_json(res).await;
    assert_eq!(updated["title"], "After");
    assert_eq!(updated["content"], "new content");
    assert!(timestamp(&updated["updatedAt"]) >= timestamp(&original["updatedAt"]));
    assert_eq!(
        timestamp(&updated["createdAt"]),
        timestamp(&original["createdAt"])
    );
}

#[tokio::test]
async fn updating_a_missing_post_is_not_found() {
    let app = app();
    let cookie = login_session(&app, "editor@example.com").await;
    let res = send(
        &app,
        with_session(
            json_request("PUT", "/api/posts/4040", json!({ "title": "t", "content": "c" })),
            &cookie,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = body_json(res).await;
    assert_eq!(body["code"], "POST_NOT_FOUND");
}

#[tokio::test]
async fn delete_is_a_404_the_second_time() {
    let app = app();
    let cookie = login_session(&app, "remover@example.com").await;
    let id = create_post(&app, &cookie, "Doomed", "short lived").await;

    let res = send(
        &app,
        with_session(empty_request("DELETE", &format!("/api/posts/{id}")), &cookie),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);

    let res = send(&app, empty_request("GET", &format!("/api/posts/{id}"))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["code"], "POST_NOT_FOUND");

    // idempotent failure, not a crash
    let res = send(
        &app,
        with_session(empty_request("DELETE", &format!("/api/posts/{id}")), &cookie),
    )
    .await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["code"], "POST_NOT_FOUND");
}

#[tokio::test]
async fn blank_update_content_is_a_field_violation() {
    let app = app();
    let cookie = login_session(&app, "editor@example.com").await;
    let id = create_post(&app, &cookie, "Fine", "fine").await;

    let res = send(
        &app,
        with_session(
            json_request(
                "PUT",
                &format!("/api/posts/{id}"),
                json!({ "title": "Fine", "content": "   " }),
            ),
            &cookie,
        ),
    )
    .await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
    assert!(body["fieldViolations"]
        .as_array()
        .unwrap()
        .iter()
        .any(|v| v["field"] == "content"));
}

#[tokio::test]
async fn keyword_search_is_case_insensitive_and_scoped() {
    let app = app();
    let cookie = login_session(&app, "writer@example.com").await;
    create_post(&app, &cookie, "Spring tips", "gardening").await;
    create_post(&app, &cookie, "Plain title", "all about SPRING boot").await;
    create_post(&app, &cookie, "Winter", "snow").await;

    let res = send(&app, empty_request("GET", "/api/posts?keyword=spring")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["totalElements"], 2);

    // restricting to titles drops the content-only hit
    let res = send(
        &app,
        empty_request("GET", "/api/posts?keyword=spring&type=TITLE"),
    )
    .await;
    let body = body_json(res).await;
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["content"][0]["title"], "Spring tips");

    let res = send(
        &app,
        empty_request("GET", "/api/posts?keyword=spring&type=CONTENT"),
    )
    .await;
    let body = body_json(res).await;
    assert_eq!(body["totalElements"], 1);
    assert_eq!(body["content"][0]["title"], "Plain title");
}

#[tokio::test]
async fn created_at_bounds_filter_the_listing() {
    let app = app();
    let cookie = login_session(&app, "writer@example.com").await;
    create_post(&app, &cookie, "Now", "current").await;

    let res = send(
        &app,
        empty_request("GET", "/api/posts?createdFrom=2999-01-01T00:00:00"),
    )
    .await;
    assert_eq!(body_json(res).await["totalElements"], 0);

    let res = send(
        &app,
        empty_request(
            "GET",
            "/api/posts?createdFrom=2000-01-01T00:00:00&createdTo=2999-01-01T00:00:00",
        ),
    )
    .await;
    assert_eq!(body_json(res).await["totalElements"], 1);
}

#[tokio::test]
async fn oversized_page_requests_are_clamped() {
    let app = app();
    let res = send(&app, empty_request("GET", "/api/posts?size=1000")).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(body["size"], 50);
}

#[tokio::test]
async fn listing_pages_and_sorts_by_creation_time() {
    let app = app();
    let cookie = login_session(&app, "writer@example.com").await;
    let first = create_post(&app, &cookie, "one", "1").await;
    let second = create_post(&app, &cookie, "two", "2").await;
    let third = create_post(&app, &cookie, "three", "3").await;

    let res = send(&app, empty_request("GET", "/api/posts?size=2")).await;
    let body = body_json(res).await;
    assert_eq!(body["totalElements"], 3);
    assert_eq!(body["totalPages"], 2);
    assert_eq!(body["page"], 0);
    let ids: Vec<i64> = body["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    // newest first by default
    assert_eq!(ids, vec![third, second]);

    let res = send(&app, empty_request("GET", "/api/posts?size=2&page=1")).await;
    let body = body_json(res).await;
    assert_eq!(body["content"].as_array().unwrap().len(), 1);
    assert_eq!(body["content"][0]["id"], first);

    let res = send(
        &app,
        empty_request("GET", "/api/posts?size=50&sort=createdAt,asc"),
    )
    .await;
    let body = body_json(res).await;
    let ids: Vec<i64> = body["content"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[tokio::test]
async fn non_numeric_post_id_is_rejected_in_the_envelope() {
    let app = app();
    let res = send(&app, empty_request("GET", "/api/posts/abc")).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = body_json(res).await;
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
