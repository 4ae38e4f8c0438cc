//! HTTP Route Tests
//!
//! Full router over a recording store, driven with `oneshot`:
//! - Reads are anonymous
//! - Writes need an admin token and are rejected before the body is read
//! - Validation failures map to 400 with `{"error", "code"}` bodies

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use jobly::auth::{JwtConfig, JwtManager};
use jobly::http_server::{AppState, HttpServer, HttpServerConfig};
use jobly::store::RecordingStore;
use serde_json::{json, Value};
use tower::ServiceExt;

// =============================================================================
// Helper Functions
// =============================================================================

fn jwt() -> JwtManager {
    JwtManager::new(JwtConfig {
        secret: "http-test-secret".to_string(),
        ..JwtConfig::default()
    })
}

fn app(store: &Arc<RecordingStore>) -> Router {
    let state = Arc::new(AppState::new(store.clone(), jwt()));
    HttpServer::build_router(&HttpServerConfig::default(), state)
}

fn admin_token() -> String {
    jwt().generate_token("admin", true).unwrap()
}

fn user_token() -> String {
    jwt().generate_token("u1", false).unwrap()
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn company_row() -> Value {
    json!({
        "handle": "c1",
        "name": "C1",
        "description": "Desc1",
        "numEmployees": 1,
        "logoUrl": "http://c1.img"
    })
}

// =============================================================================
// Reads
// =============================================================================

#[tokio::test]
async fn test_health() {
    let store = Arc::new(RecordingStore::new());
    let (status, body) = send(app(&store), request(Method::GET, "/health", None, None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

/// Anyone can list companies.
#[tokio::test]
async fn test_list_companies_anonymous() {
    let store = Arc::new(RecordingStore::new());
    store.push_rows(vec![company_row()]);

    let (status, body) = send(
        app(&store),
        request(Method::GET, "/companies?minEmployees=1", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["companies"][0]["handle"], "c1");
    assert_eq!(body["companies"][0]["numEmployees"], 1);
}

/// Bad search parameters fail before the store is touched.
#[tokio::test]
async fn test_list_companies_bad_filter() {
    let store = Arc::new(RecordingStore::new());

    let (status, body) = send(
        app(&store),
        request(Method::GET, "/companies?color=red", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"error": "search parameter not allowed: color", "code": 400})
    );
    assert!(store.executed().is_empty());
}

#[tokio::test]
async fn test_list_jobs_bad_flag() {
    let store = Arc::new(RecordingStore::new());

    let (status, body) = send(
        app(&store),
        request(Method::GET, "/jobs?hasEquity=maybe", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "hasEquity must be true or false");
}

#[tokio::test]
async fn test_get_job_not_found() {
    let store = Arc::new(RecordingStore::new());

    let (status, body) = send(app(&store), request(Method::GET, "/jobs/999", None, None)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"error": "No job: 999", "code": 404}));
}

/// A non-numeric id gets the JSON error body.
#[tokio::test]
async fn test_get_job_non_numeric_id() {
    let store = Arc::new(RecordingStore::new());

    let (status, body) = send(app(&store), request(Method::GET, "/jobs/abc", None, None)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["error"].is_string());
    assert!(store.executed().is_empty());
}

/// An id past the `i32` range is a bad request, not a lookup.
#[tokio::test]
async fn test_get_job_id_out_of_range() {
    let store = Arc::new(RecordingStore::new());

    let (status, body) = send(
        app(&store),
        request(Method::GET, "/jobs/99999999999", None, None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(store.executed().is_empty());
}

// =============================================================================
// Writes
// =============================================================================

#[tokio::test]
async fn test_create_company_requires_token() {
    let store = Arc::new(RecordingStore::new());

    let (status, body) = send(
        app(&store),
        request(Method::POST, "/companies", None, Some(company_row())),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);
    assert!(store.executed().is_empty());
}

/// A garbage token is treated as no token.
#[tokio::test]
async fn test_create_company_invalid_token() {
    let store = Arc::new(RecordingStore::new());

    let (status, _) = send(
        app(&store),
        request(Method::POST, "/companies", Some("not-a-jwt"), Some(company_row())),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_company_requires_admin() {
    let store = Arc::new(RecordingStore::new());

    let (status, body) = send(
        app(&store),
        request(
            Method::POST,
            "/companies",
            Some(&user_token()),
            Some(company_row()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 403);
    assert!(store.executed().is_empty());
}

/// Unauthorized requests are rejected even when the body is malformed.
#[tokio::test]
async fn test_auth_checked_before_body() {
    let store = Arc::new(RecordingStore::new());

    let (status, _) = send(
        app(&store),
        request(Method::POST, "/companies", None, Some(json!({"bogus": true}))),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_company_as_admin() {
    let store = Arc::new(RecordingStore::new());
    store.push_empty().push_rows(vec![company_row()]);

    let (status, body) = send(
        app(&store),
        request(
            Method::POST,
            "/companies",
            Some(&admin_token()),
            Some(company_row()),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["company"], company_row());
    assert_eq!(store.executed().len(), 2);
}

#[tokio::test]
async fn test_create_company_unknown_field() {
    let store = Arc::new(RecordingStore::new());
    let mut payload = company_row();
    payload["color"] = json!("red");

    let (status, body) = send(
        app(&store),
        request(Method::POST, "/companies", Some(&admin_token()), Some(payload)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(store.executed().is_empty());
}

#[tokio::test]
async fn test_create_company_bad_handle() {
    let store = Arc::new(RecordingStore::new());
    let mut payload = company_row();
    payload["handle"] = json!("Not A Handle");

    let (status, _) = send(
        app(&store),
        request(Method::POST, "/companies", Some(&admin_token()), Some(payload)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(store.executed().is_empty());
}

#[tokio::test]
async fn test_update_company_empty_payload() {
    let store = Arc::new(RecordingStore::new());

    let (status, body) = send(
        app(&store),
        request(
            Method::PATCH,
            "/companies/c1",
            Some(&admin_token()),
            Some(json!({})),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "no data supplied");
}

#[tokio::test]
async fn test_delete_job_as_admin() {
    let store = Arc::new(RecordingStore::new());
    store.push_rows(vec![json!({"id": 1})]);

    let (status, body) = send(
        app(&store),
        request(Method::DELETE, "/jobs/1", Some(&admin_token()), None),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"deleted": 1}));
}

#[tokio::test]
async fn test_delete_missing_company() {
    let store = Arc::new(RecordingStore::new());

    let (status, body) = send(
        app(&store),
        request(Method::DELETE, "/companies/nope", Some(&admin_token()), None),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "No company: nope");
}

#[tokio::test]
async fn test_delete_job_bad_id_as_admin() {
    let store = Arc::new(RecordingStore::new());

    let (status, body) = send(
        app(&store),
        request(Method::DELETE, "/jobs/abc", Some(&admin_token()), None),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(store.executed().is_empty());
}
