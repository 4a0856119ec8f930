//! Router-level tests for both gatekeeper endpoints.
//!
//! The router is driven in-process with `tower::ServiceExt::oneshot`; the
//! upstream gatekeeper is an `httpmock` server.

use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use gatekeeper::{AppState, app, relay::GatekeeperClient, validator::Validator};
use http_body_util::BodyExt as _;
use httpmock::{Method::POST, MockServer};
use serde_json::{Value, json};
use tower::ServiceExt as _;

const ACCESS_PATH: &str = "/api/gatekeeper/access";
const KEY_PATH: &str = "/api/toyProductionKey";

fn router_for(upstream_url: String) -> Router {
    let client = GatekeeperClient::new(upstream_url, Duration::from_secs(2)).unwrap();
    app(AppState::new(Validator::default(), client), 64 * 1024)
}

fn offline_router() -> Router {
    router_for("http://127.0.0.1:1/api/gatekeeper/access".to_string())
}

fn post_json(path: &str, body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ── Key intake ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn valid_key_is_acknowledged() {
    let resp = offline_router()
        .oneshot(post_json(KEY_PATH, r#"{"toyProductionKey":"plush123!"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Toy production key received successfully");
    assert_eq!(body["toyProductionKey"], "plush123!");
}

#[tokio::test]
async fn invalid_key_is_rejected_with_400() {
    let resp = offline_router()
        .oneshot(post_json(KEY_PATH, r#"{"toyProductionKey":"Plush"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        json!({"error": "Invalid toy production key format"})
    );
}

#[tokio::test]
async fn malformed_key_body_is_rejected_with_400() {
    for body in [r#"{"key":"Plush123!"}"#, "not json", r#"{"toyProductionKey":42}"#] {
        let resp = offline_router()
            .oneshot(post_json(KEY_PATH, body))
            .await
            .unwrap();

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(body_json(resp).await, json!({"error": "Invalid request body"}));
    }
}

#[tokio::test]
async fn missing_content_type_is_a_malformed_body() {
    let req = Request::builder()
        .method("POST")
        .uri(KEY_PATH)
        .body(Body::from(r#"{"toyProductionKey":"Plush123!"}"#))
        .unwrap();

    let resp = offline_router().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ── Access relay ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn valid_secret_relays_upstream_body() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(ACCESS_PATH).json_body(json!({
                "orderServiceHostOrIpAddress": "order.internal:8080",
                "secretInput": "Plush123!",
            }));
            then.status(200)
                .header("content-type", "application/json")
                .body(r#"{"status":"success"}"#);
        })
        .await;

    let resp = router_for(server.url(ACCESS_PATH))
        .oneshot(post_json(
            ACCESS_PATH,
            r#"{"orderServiceHostOrIpAddress":"order.internal:8080","secretInput":"Plush123!"}"#,
        ))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), br#"{"status":"success"}"#);
}

#[tokio::test]
async fn invalid_secret_is_rejected_without_outbound_call() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path(ACCESS_PATH);
            then.status(200).body(r#"{"status":"success"}"#);
        })
        .await;

    let resp = router_for(server.url(ACCESS_PATH))
        .oneshot(post_json(
            ACCESS_PATH,
            r#"{"orderServiceHostOrIpAddress":"10.0.0.1","secretInput":"Teddy123!"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(resp).await,
        json!({"error": "Invalid secret input format"})
    );
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn malformed_access_body_is_rejected_with_400() {
    let resp = offline_router()
        .oneshot(post_json(ACCESS_PATH, r#"{"secretInput":"Plush123!"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await, json!({"error": "Invalid request body"}));
}

#[tokio::test]
async fn unreachable_upstream_returns_500_with_cause() {
    let resp = offline_router()
        .oneshot(post_json(
            ACCESS_PATH,
            r#"{"orderServiceHostOrIpAddress":"10.0.0.1","secretInput":"Plush123!"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(resp).await;
    let msg = body["error"].as_str().unwrap();
    assert!(
        msg.starts_with("Failed to access Gatekeeper Service: request to gatekeeper failed"),
        "unexpected error: {msg}"
    );
}

#[tokio::test]
async fn upstream_error_status_returns_500() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(ACCESS_PATH);
            then.status(502).body("bad gateway");
        })
        .await;

    let resp = router_for(server.url(ACCESS_PATH))
        .oneshot(post_json(
            ACCESS_PATH,
            r#"{"orderServiceHostOrIpAddress":"10.0.0.1","secretInput":"Plush123!"}"#,
        ))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(resp).await,
        json!({"error": "Failed to access Gatekeeper Service: gatekeeper answered with status code 502"})
    );
}

// ── Misc ──────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn healthz_answers_ok() {
    let req = Request::builder()
        .uri("/healthz")
        .body(Body::empty())
        .unwrap();
    let resp = offline_router().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(bytes.as_ref(), b"ok");
}

fn tiny_limit_router() -> Router {
    let client =
        GatekeeperClient::new("http://127.0.0.1:1/api/gatekeeper/access", Duration::from_secs(1))
            .unwrap();
    app(AppState::new(Validator::default(), client), 16)
}

#[tokio::test]
async fn oversized_body_without_content_length_is_a_malformed_body() {
    let resp = tiny_limit_router()
        .oneshot(post_json(KEY_PATH, r#"{"toyProductionKey":"Plush123!"}"#))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await, json!({"error": "Invalid request body"}));
}

#[tokio::test]
async fn oversized_body_with_content_length_is_a_malformed_body() {
    let body = r#"{"toyProductionKey":"Plush123!"}"#;
    let req = Request::builder()
        .method("POST")
        .uri(KEY_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::CONTENT_LENGTH, body.len())
        .body(Body::from(body))
        .unwrap();

    let resp = tiny_limit_router().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await, json!({"error": "Invalid request body"}));
}

#[tokio::test]
async fn unknown_path_returns_json_404() {
    let resp = offline_router()
        .oneshot(post_json("/api/nope", "{}"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await, json!({"error": "Not found"}));
}

#[tokio::test]
async fn wrong_method_returns_json_405() {
    let req = Request::builder()
        .method("GET")
        .uri(ACCESS_PATH)
        .body(Body::empty())
        .unwrap();

    let resp = offline_router().oneshot(req).await.unwrap();

    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_json(resp).await, json!({"error": "Method not allowed"}));
}
