//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use mini_shortlink::{
    api::create_router,
    kv::{KvStore, MemoryStore},
    AppState,
};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app() -> Router {
    create_router(AppState::in_memory(MemoryStore::new(1000)))
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn shorten_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/shorten")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn shorten(app: &Router, url: &str, exp: i64) -> String {
    let body = serde_json::json!({ "url": url, "expiration_in_minutes": exp }).to_string();
    let response = app.clone().oneshot(shorten_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_to_json(response.into_body()).await;
    json["shortlink"].as_str().unwrap().to_string()
}

// == Shorten Endpoint Tests ==

#[tokio::test]
async fn test_shorten_endpoint_success() {
    let app = create_test_app();

    let response = app
        .oneshot(shorten_request(
            r#"{"url":"https://example.com","expiration_in_minutes":60}"#,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["shortlink"], "1");
}

#[tokio::test]
async fn test_shorten_same_url_returns_same_token() {
    let app = create_test_app();

    let first = shorten(&app, "https://a.com", 60).await;
    let second = shorten(&app, "https://a.com", 60).await;
    let other = shorten(&app, "https://b.com", 60).await;

    assert_eq!(first, second);
    assert_ne!(first, other);
}

#[tokio::test]
async fn test_shorten_malformed_json() {
    let app = create_test_app();

    let response = app.oneshot(shorten_request("{not json")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

#[tokio::test]
async fn test_shorten_validation_failures() {
    let app = create_test_app();

    for body in [
        r#"{"url":"","expiration_in_minutes":10}"#,
        r#"{"url":"https://a.com","expiration_in_minutes":-1}"#,
        r#"{"url":"https://a.com"}"#,
    ] {
        let response = app.clone().oneshot(shorten_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {}", body);
    }
}

// == Info Endpoint Tests ==

#[tokio::test]
async fn test_info_endpoint_success() {
    let app = create_test_app();
    let token = shorten(&app, "https://example.com", 60).await;

    let response = app
        .oneshot(get_request(&format!("/api/info?shortlink={}", token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["url"], "https://example.com");
    assert_eq!(json["expiration_in_minutes"], 60);
    assert!(json["created_at"].is_string());
}

#[tokio::test]
async fn test_info_unknown_token() {
    let app = create_test_app();

    let response = app
        .oneshot(get_request("/api/info?shortlink=abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("abc"));
}

#[tokio::test]
async fn test_info_missing_parameter() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/api/info")).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_info_invalid_token() {
    let app = create_test_app();

    let response = app
        .oneshot(get_request("/api/info?shortlink=a%2Db"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == Redirect Endpoint Tests ==

#[tokio::test]
async fn test_redirect_success() {
    let app = create_test_app();
    let token = shorten(&app, "https://example.com/some/page?x=1", 60).await;

    let response = app
        .oneshot(get_request(&format!("/{}", token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com/some/page?x=1"
    );
}

#[tokio::test]
async fn test_redirect_unknown_token() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/doesnotexist")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_redirect_rejects_bad_shape() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/bad_token")).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_zero_expiration_link_resolves() {
    let app = create_test_app();
    let token = shorten(&app, "https://forever.example", 0).await;

    let response = app
        .oneshot(get_request(&format!("/{}", token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_url_with_control_character_is_rejected() {
    let app = create_test_app();

    let body = serde_json::json!({ "url": "https://a.com/x\ny", "expiration_in_minutes": 60 })
        .to_string();
    let response = app.clone().oneshot(shorten_request(&body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was allocated, so the first token stays unknown.
    let response = app.oneshot(get_request("/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_redirect_non_ascii_url() {
    let app = create_test_app();
    let token = shorten(&app, "https://例え.jp/パス", 60).await;

    let response = app
        .oneshot(get_request(&format!("/{}", token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
}

#[tokio::test]
async fn test_redirect_unrepresentable_stored_url() {
    let store = MemoryStore::new(100);
    store
        .set("shortlink:1:url", "https://a.com/x\ny", None)
        .await
        .unwrap();
    let app = create_router(AppState::in_memory(store));

    let response = app.oneshot(get_request("/1")).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_to_json(response.into_body()).await;
    assert!(json.get("error").is_some());
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_app();

    let response = app.oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert!(json.get("timestamp").is_some());
}

// == Concurrency Tests ==

#[tokio::test]
async fn test_concurrent_shortens_allocate_unique_tokens() {
    let app = create_test_app();

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let app = app.clone();
            tokio::spawn(async move { shorten(&app, &format!("https://site{}.com", i), 30).await })
        })
        .collect();

    let mut tokens = std::collections::HashSet::new();
    for handle in handles {
        assert!(tokens.insert(handle.await.unwrap()));
    }
    assert_eq!(tokens.len(), 50);
}
