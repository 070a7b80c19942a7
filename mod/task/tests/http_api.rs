//! HTTP-level tests — drive the real router end to end.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use task::TaskModule;
use tasklist_core::Module;
use tasklist_docstore::RedbStore;

fn build_router() -> (Router, tempfile::TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let db = RedbStore::open(&dir.path().join("test.redb")).unwrap();
    let module = TaskModule::new(Arc::new(db));
    (module.routes(), dir)
}

async fn api_call(
    router: &Router,
    method: &str,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    let body = match body {
        Some(v) => Body::from(serde_json::to_string(&v).unwrap()),
        None => Body::empty(),
    };
    let req = builder.body(body).unwrap();
    let resp = router.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let json = if bytes.is_empty() {
        serde_json::json!(null)
    } else {
        serde_json::from_slice(&bytes).unwrap_or(serde_json::json!(null))
    };
    (status, json)
}

// ── Full lifecycle: create → complete via update → delete → gone ──

#[tokio::test]
async fn task_lifecycle() {
    let (router, _dir) = build_router();

    // Create with completed:true — forced back to false, id assigned.
    let (status, created) = api_call(
        &router,
        "POST",
        "/api/tasks",
        Some(serde_json::json!({
            "title": "Buy milk",
            "description": "2%",
            "completed": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["completed"], false);
    assert_eq!(created["title"], "Buy milk");
    let id = created["id"].as_str().unwrap().to_string();
    assert!(!id.is_empty());

    // Update may mark it completed.
    let (status, updated) = api_call(
        &router,
        "PUT",
        &format!("/api/tasks/{id}"),
        Some(serde_json::json!({
            "title": "Buy milk",
            "description": "2%",
            "completed": true,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["completed"], true);
    assert_eq!(updated["id"], id.as_str());

    // Delete it.
    let (status, _) = api_call(&router, "DELETE", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Gone.
    let (status, body) = api_call(&router, "GET", &format!("/api/tasks/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

// ── Validation ──

#[tokio::test]
async fn create_empty_title_is_400() {
    let (router, _dir) = build_router();

    for title in ["", "   "] {
        let (status, body) = api_call(
            &router,
            "POST",
            "/api/tasks",
            Some(serde_json::json!({"title": title})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_FAILED");
    }

    // Nothing was persisted.
    let (_, count) = api_call(&router, "GET", "/api/tasks/count", None).await;
    assert_eq!(count, serde_json::json!(0));
}

// ── Not-found paths ──

#[tokio::test]
async fn missing_id_is_404() {
    let (router, _dir) = build_router();

    let (status, _) = api_call(&router, "GET", "/api/tasks/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = api_call(
        &router,
        "PUT",
        "/api/tasks/nope",
        Some(serde_json::json!({"title": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = api_call(&router, "DELETE", "/api/tasks/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // A failed update creates nothing.
    let (_, tasks) = api_call(&router, "GET", "/api/tasks", None).await;
    assert_eq!(tasks.as_array().unwrap().len(), 0);
}

// ── Listing, counting, clearing ──

#[tokio::test]
async fn list_count_and_clear() {
    let (router, _dir) = build_router();

    for title in ["a", "b", "c"] {
        let (status, _) = api_call(
            &router,
            "POST",
            "/api/tasks",
            Some(serde_json::json!({"title": title})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, tasks) = api_call(&router, "GET", "/api/tasks", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(tasks.as_array().unwrap().len(), 3);

    let (status, count) = api_call(&router, "GET", "/api/tasks/count", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(count, serde_json::json!(3));

    // Clear-all always succeeds, even when repeated.
    let (status, _) = api_call(&router, "DELETE", "/api/tasks", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = api_call(&router, "DELETE", "/api/tasks", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, count) = api_call(&router, "GET", "/api/tasks/count", None).await;
    assert_eq!(count, serde_json::json!(0));
}
