//! Integration tests for the API key gate and request tracing.

mod common;

use axum::http::StatusCode;
use common::{TEST_API_KEY, TestServer, json_request, send};
use serde_json::json;

/// Every route behind the gate, with a body where one is expected.
fn protected_requests() -> Vec<(&'static str, &'static str, Option<serde_json::Value>)> {
    let product = json!({"name": "Widget", "price": 9.99});
    vec![
        ("GET", "/api/v1/product/", None),
        ("GET", "/api/v1/product", None),
        ("GET", "/api/v1/product/1", None),
        ("POST", "/api/v1/product/create", Some(product.clone())),
        ("PUT", "/api/v1/product/update/1", Some(product)),
        ("DELETE", "/api/v1/product/remove/1", None),
        ("GET", "/api/v1/views/", None),
        ("GET", "/api/v1/settings/", None),
        ("GET", "/api/v1/database/", None),
    ]
}

#[tokio::test]
async fn test_missing_key_is_unprocessable_everywhere() {
    let server = TestServer::new();

    for (method, uri, body) in protected_requests() {
        let (status, body) = json_request(&server.router, method, uri, body, None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY, "{method} {uri}");
        assert_eq!(body["code"], "missing_credential");
        assert_eq!(
            body["detail"],
            json!([{"field": "x-api-key", "message": "field required"}])
        );
    }

    assert_eq!(server.store().list_all().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_wrong_key_is_forbidden_everywhere() {
    let server = TestServer::new();

    for (method, uri, body) in protected_requests() {
        let (status, body) = json_request(&server.router, method, uri, body, Some("wrong")).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{method} {uri}");
        assert_eq!(body["code"], "unauthorized");
        assert_eq!(body["detail"], "Invalid API Key");
    }

    // Nothing was created, updated, or deleted
    let products = server.store().list_all().await.unwrap();
    assert_eq!(products.len(), 4);
    assert_eq!(products[&1].name, "Product 1");
}

#[tokio::test]
async fn test_empty_key_is_missing() {
    let server = TestServer::new();

    let (status, body) =
        json_request(&server.router, "GET", "/api/v1/product/", None, Some("")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "missing_credential");
}

#[tokio::test]
async fn test_key_comparison_is_exact() {
    let server = TestServer::new();

    for key in ["TESTING", "testing2", " testing"] {
        let (status, _) =
            json_request(&server.router, "GET", "/api/v1/product/", None, Some(key)).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{key:?}");
    }
}

#[tokio::test]
async fn test_bad_key_beats_invalid_body() {
    let server = TestServer::new();

    let (status, body) = json_request(
        &server.router,
        "POST",
        "/api/v1/product/create",
        Some(json!({"name": "A", "price": 0.5})),
        Some("wrong"),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["detail"], "Invalid API Key");

    let response = send(
        &server.router,
        "PUT",
        "/api/v1/product/update/1",
        Some(b"not json".to_vec()),
        Some("wrong"),
    )
    .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_configured_key_is_used() {
    let store = TestServer::new().store();
    let server = TestServer::with_config(store, |config| {
        config.auth.api_key = "s3cret".to_string();
    });

    let (status, _) =
        json_request(&server.router, "GET", "/api/v1/product/", None, Some("s3cret")).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) =
        json_request(&server.router, "GET", "/api/v1/product/", None, Some(TEST_API_KEY)).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_health_needs_no_key() {
    let server = TestServer::new();

    for uri in ["/api/v1/healths/", "/api/v1/healths"] {
        let (status, body) = json_request(&server.router, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!({"status": "You app has a good health ✅"}));
    }

    // A wrong key is ignored on the public route
    let (status, _) =
        json_request(&server.router, "GET", "/api/v1/healths/", None, Some("wrong")).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_views_with_key() {
    let server = TestServer::new();

    for uri in ["/api/v1/views/", "/api/v1/views"] {
        let (status, body) =
            json_request(&server.router, "GET", uri, None, Some(TEST_API_KEY)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!({"status": "You have access ✅"}));
    }
}

#[tokio::test]
async fn test_settings_echoes_checked_key() {
    let server = TestServer::new();

    for uri in ["/api/v1/settings/", "/api/v1/settings"] {
        let (status, body) =
            json_request(&server.router, "GET", uri, None, Some(TEST_API_KEY)).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body, json!({"api_key": "testing"}));
    }
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = TestServer::new();

    let response = send(&server.router, "GET", "/api/v1/unknown", None, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(
        response.body,
        json!({"code": "route_not_found", "detail": "Not Found"})
    );
}

#[tokio::test]
async fn test_client_trace_id_is_echoed() {
    let server = TestServer::new();

    let response = send(&server.router, "GET", "/api/v1/healths/", None, None).await;
    let generated = response.headers["x-trace-id"].to_str().unwrap();
    assert!(uuid::Uuid::parse_str(generated).is_ok());

    let request = axum::http::Request::builder()
        .uri("/api/v1/product/")
        .header("x-trace-id", "client-trace-42")
        .body(axum::body::Body::empty())
        .unwrap();
    let response = tower::ServiceExt::oneshot(server.router.clone(), request)
        .await
        .unwrap();

    // Rejected requests still carry the trace id
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.headers()["x-trace-id"], "client-trace-42");
}
