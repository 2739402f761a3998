//! Integration tests for the request executor using wiremock.
//!
//! These tests verify the executor against a mock HTTP server, covering
//! header injection, error translation, the one-shot 401 re-auth retry,
//! and the single-flight token refresh of the client-credentials strategy.

use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tradelink_connector::auth::{ApiKeyAuth, BasicAuth, ClientCredentialsAuth};
use tradelink_connector::error::AdapterError;
use tradelink_connector::executor::RequestExecutor;

// =============================================================================
// Test Helpers
// =============================================================================

fn api_key_executor(base_url: &str) -> RequestExecutor {
    let auth = Arc::new(ApiKeyAuth::new("x-api-key", "secret-123"));
    RequestExecutor::new(base_url, auth, Vec::new(), 30).unwrap()
}

fn bearer_token_mock(token: &str, expires_in: u64) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "access_token": token,
        "token_type": "Bearer",
        "expires_in": expires_in,
    }))
}

// =============================================================================
// Header Injection
// =============================================================================

#[tokio::test]
async fn test_api_key_header_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .and(header("x-api-key", "secret-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
        .expect(1)
        .mount(&server)
        .await;

    let executor = api_key_executor(&server.uri());
    let body = executor.get("/admin/products", &[]).await.unwrap();
    assert_eq!(body, json!({"products": []}));
}

#[tokio::test]
async fn test_basic_auth_header_sent() {
    let server = MockServer::start().await;

    // base64("admin:secret")
    Mock::given(method("GET"))
        .and(path("/api/company"))
        .and(header("Authorization", "Basic YWRtaW46c2VjcmV0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "co_1"})))
        .expect(1)
        .mount(&server)
        .await;

    let auth = Arc::new(BasicAuth::new("admin", "secret"));
    let executor = RequestExecutor::new(server.uri(), auth, Vec::new(), 30).unwrap();
    executor.get("/api/company", &[]).await.unwrap();
}

#[tokio::test]
async fn test_extra_headers_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/items"))
        .and(header("X-Company-Id", "co_42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let auth = Arc::new(BasicAuth::new("admin", "secret"));
    let executor = RequestExecutor::new(
        server.uri(),
        auth,
        vec![("X-Company-Id".to_string(), "co_42".to_string())],
        30,
    )
    .unwrap();
    executor.get("/api/items", &[]).await.unwrap();
}

#[tokio::test]
async fn test_query_parameters_sent() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": [], "count": 0})))
        .expect(1)
        .mount(&server)
        .await;

    let executor = api_key_executor(&server.uri());
    executor
        .get(
            "/admin/products",
            &[
                ("limit".to_string(), "5".to_string()),
                ("offset".to_string(), "0".to_string()),
            ],
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn test_post_body_sent_verbatim() {
    let server = MockServer::start().await;

    let product = json!({"title": "Desk Lamp", "sku": "LAMP-01"});
    Mock::given(method("POST"))
        .and(path("/admin/products"))
        .and(body_json(&product))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"product": {"id": "prod_1"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let executor = api_key_executor(&server.uri());
    let created = executor.post("/admin/products", &product).await.unwrap();
    assert_eq!(created["product"]["id"], "prod_1");
}

// =============================================================================
// Error Translation
// =============================================================================

#[tokio::test]
async fn test_non_2xx_preserves_body_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/products/missing"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"error":"product not found"}"#),
        )
        .mount(&server)
        .await;

    let executor = api_key_executor(&server.uri());
    let err = executor
        .get("/admin/products/missing", &[])
        .await
        .unwrap_err();

    match err {
        AdapterError::RequestFailed { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, r#"{"error":"product not found"}"#);
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_surfaces_status() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/admin/products/prod_1"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let executor = api_key_executor(&server.uri());
    let err = executor.delete("/admin/products/prod_1").await.unwrap_err();
    match err {
        AdapterError::RequestFailed { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_body_becomes_null() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/admin/products/prod_1"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let executor = api_key_executor(&server.uri());
    let body = executor.delete("/admin/products/prod_1").await.unwrap();
    assert!(body.is_null());
}

#[tokio::test]
async fn test_unreachable_host_is_connection_failure() {
    // Nothing listens on this port.
    let executor = api_key_executor("http://127.0.0.1:9");
    let err = executor.get("/admin/system", &[]).await.unwrap_err();
    assert!(matches!(
        err,
        AdapterError::ConnectionFailed { .. } | AdapterError::ConnectionTimeout { .. }
    ));
}

// =============================================================================
// 401 Re-Auth Retry
// =============================================================================

#[tokio::test]
async fn test_static_auth_does_not_retry_on_401() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .respond_with(ResponseTemplate::new(401).set_body_string("unauthorized"))
        .expect(1)
        .mount(&server)
        .await;

    let executor = api_key_executor(&server.uri());
    let err = executor.get("/admin/products", &[]).await.unwrap_err();
    assert!(err.is_auth());
}

#[tokio::test]
async fn test_expired_token_retried_once_with_fresh_token() {
    let server = MockServer::start().await;

    // Token endpoint hands out a new token on each call.
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(bearer_token_mock("token-1", 3600))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(bearer_token_mock("token-2", 3600))
        .mount(&server)
        .await;

    // The resource rejects the first token and accepts the second.
    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(header("Authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("token revoked"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(header("Authorization", "Bearer token-2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(1)
        .mount(&server)
        .await;

    let auth = Arc::new(ClientCredentialsAuth::new(
        format!("{}/oauth/token", server.uri()),
        "client-1",
        "secret",
        None,
        reqwest::Client::new(),
    ));
    let executor = RequestExecutor::new(server.uri(), auth, Vec::new(), 30).unwrap();

    let body = executor.get("/api/v1/items", &[]).await.unwrap();
    assert_eq!(body, json!({"value": []}));
}

#[tokio::test]
async fn test_second_401_fails_without_further_retries() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(bearer_token_mock("token-1", 3600))
        .mount(&server)
        .await;

    // Two resource calls total: the original and exactly one retry.
    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .respond_with(ResponseTemplate::new(401).set_body_string("nope"))
        .expect(2)
        .mount(&server)
        .await;

    let auth = Arc::new(ClientCredentialsAuth::new(
        format!("{}/oauth/token", server.uri()),
        "client-1",
        "secret",
        None,
        reqwest::Client::new(),
    ));
    let executor = RequestExecutor::new(server.uri(), auth, Vec::new(), 30).unwrap();

    let err = executor.get("/api/v1/items", &[]).await.unwrap_err();
    assert!(matches!(err, AdapterError::AuthenticationFailed));
}

// =============================================================================
// Single-Flight Token Refresh
// =============================================================================

#[tokio::test]
async fn test_concurrent_requests_fetch_token_once() {
    let server = MockServer::start().await;

    // The token endpoint must be hit exactly once no matter how many
    // requests race on the cold cache.
    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(bearer_token_mock("token-1", 3600))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/v1/items"))
        .and(header("Authorization", "Bearer token-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"value": []})))
        .expect(8)
        .mount(&server)
        .await;

    let auth = Arc::new(ClientCredentialsAuth::new(
        format!("{}/oauth/token", server.uri()),
        "client-1",
        "secret",
        None,
        reqwest::Client::new(),
    ));
    let executor = Arc::new(RequestExecutor::new(server.uri(), auth, Vec::new(), 30).unwrap());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let executor = Arc::clone(&executor);
        handles.push(tokio::spawn(async move {
            executor.get("/api/v1/items", &[]).await
        }));
    }
    for handle in handles {
        handle.await.unwrap().unwrap();
    }
}

#[tokio::test]
async fn test_token_fetch_rejection_is_auth_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/token"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "invalid_client"})),
        )
        .mount(&server)
        .await;

    let auth = Arc::new(ClientCredentialsAuth::new(
        format!("{}/oauth/token", server.uri()),
        "client-1",
        "wrong-secret",
        None,
        reqwest::Client::new(),
    ));
    let executor = RequestExecutor::new(server.uri(), auth, Vec::new(), 30).unwrap();

    let err = executor.get("/api/v1/items", &[]).await.unwrap_err();
    assert!(matches!(err, AdapterError::AuthenticationFailed));
}

// =============================================================================
// Stale-Credential Demotion
// =============================================================================

#[tokio::test]
async fn test_auth_failure_on_live_connection_demotes_to_error() {
    use tradelink_connector::adapter::AdapterCore;
    use tradelink_connector::types::{BackendType, ConnectionStatus, ResourceType};

    let server = MockServer::start().await;

    // The key was revoked after connect: every request now comes back 401.
    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "revoked"})))
        .mount(&server)
        .await;

    let core = AdapterCore::new(
        "Test Backend",
        BackendType::Commerce,
        vec![ResourceType::Products],
    );
    core.set_connected(Arc::new(api_key_executor(&server.uri())), "2.1.0", 5);
    assert!(core.is_connected());

    let err = core.get("/admin/products", &[]).await.unwrap_err();
    assert!(matches!(err, AdapterError::AuthenticationFailed));
    assert_eq!(core.system_info().status, ConnectionStatus::Error);
    assert!(!core.is_connected());

    // The executor is gone: later calls fail fast instead of retrying.
    let err = core.get("/admin/products", &[]).await.unwrap_err();
    assert!(matches!(err, AdapterError::NotConnected));
}

#[tokio::test]
async fn test_ordinary_request_failure_stays_connected() {
    use tradelink_connector::adapter::AdapterCore;
    use tradelink_connector::types::{BackendType, ConnectionStatus, ResourceType};

    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let core = AdapterCore::new(
        "Test Backend",
        BackendType::Commerce,
        vec![ResourceType::Products],
    );
    core.set_connected(Arc::new(api_key_executor(&server.uri())), "2.1.0", 5);

    let err = core.get("/admin/products", &[]).await.unwrap_err();
    assert!(matches!(err, AdapterError::RequestFailed { status: 500, .. }));
    assert_eq!(core.system_info().status, ConnectionStatus::Connected);
}
