//! End-to-end HTTP tests against the in-memory store

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use notes_server::http::{build_router, AppState};
use notes_server::MemoryNoteStore;

fn app() -> Router {
    build_router(AppState::new(Arc::new(MemoryNoteStore::new())))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

#[tokio::test]
async fn note_lifecycle_over_http() {
    let app = app();

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/v1/notes",
        Some(json!({ "title": "t", "content": "c" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["title"], "t");
    assert_eq!(created["content"], "c");
    assert!(created["created_at"].is_string());
    assert_eq!(created["created_at"], created["updated_at"]);

    let (status, fetched) = send(&app, Method::GET, "/api/v1/notes/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PATCH,
        "/api/v1/notes/1",
        Some(json!({ "title": "t2", "content": "c2" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["title"], "t2");
    assert_eq!(updated["content"], "c2");
    assert_eq!(updated["created_at"], created["created_at"]);

    let (status, body) = send(&app, Method::DELETE, "/api/v1/notes/1", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (status, body) = send(&app, Method::GET, "/api/v1/notes/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "not_found");
}

#[tokio::test]
async fn put_is_an_alias_for_patch() {
    let app = app();
    send(
        &app,
        Method::POST,
        "/api/v1/notes",
        Some(json!({ "title": "t", "content": "c" })),
    )
    .await;

    let (status, updated) = send(
        &app,
        Method::PUT,
        "/api/v1/notes/1",
        Some(json!({ "title": "put", "content": "body" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "put");
}

#[tokio::test]
async fn unknown_note_is_404() {
    let app = app();

    let (status, body) = send(&app, Method::GET, "/api/v1/notes/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "note '999' not found");

    let (status, _) = send(
        &app,
        Method::PATCH,
        "/api/v1/notes/999",
        Some(json!({ "title": "x", "content": "y" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::DELETE, "/api/v1/notes/999", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_returns_newest_first() {
    let app = app();
    for title in ["first", "second", "third"] {
        send(
            &app,
            Method::POST,
            "/api/v1/notes",
            Some(json!({ "title": title, "content": "" })),
        )
        .await;
    }
    send(&app, Method::DELETE, "/api/v1/notes/2", None).await;

    let (status, body) = send(&app, Method::GET, "/api/v1/notes", None).await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["third", "first"]);
}

#[tokio::test]
async fn empty_list_is_an_empty_array() {
    let (status, body) = send(&app(), Method::GET, "/api/v1/notes", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn malformed_body_is_400() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/notes")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "validation_error");

    // Nothing was created
    let (_, list) = send(&app, Method::GET, "/api/v1/notes", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn missing_content_type_is_400() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/notes")
        .body(Body::from(json!({ "title": "t" }).to_string()))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn non_numeric_id_is_400() {
    let app = app();
    for uri in ["/api/v1/notes/abc", "/api/v1/notes/0", "/api/v1/notes/-3"] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
        assert_eq!(body["error"], "validation_error");
    }
}

#[tokio::test]
async fn missing_fields_create_empty_note() {
    let (status, body) = send(&app(), Method::POST, "/api/v1/notes", Some(json!({}))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "");
    assert_eq!(body["content"], "");
}

#[tokio::test]
async fn expired_deadline_is_504() {
    let app = build_router(
        AppState::new(Arc::new(MemoryNoteStore::new())).with_request_timeout(Duration::ZERO),
    );

    let (status, body) = send(&app, Method::GET, "/api/v1/notes", None).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], "timeout");
}

#[tokio::test]
async fn health_reports_backend() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "memory");
}
