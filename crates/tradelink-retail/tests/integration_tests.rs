//! Integration tests for the retail ERP adapter using wiremock.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tradelink_connector::adapter::BackofficeAdapter;
use tradelink_connector::config::{AuthConfig, ConnectionConfig};
use tradelink_connector::error::AdapterError;
use tradelink_connector::options::{ListOptions, SyncOptions, SyncStatus};
use tradelink_connector::types::{ConnectionStatus, ResourceType};
use tradelink_retail::RetailAdapter;

// =============================================================================
// Test Helpers
// =============================================================================

// base64("erp-admin:hunter2")
const BASIC_HEADER: &str = "Basic ZXJwLWFkbWluOmh1bnRlcjI=";

fn config(base_url: &str) -> ConnectionConfig {
    ConnectionConfig::new(base_url, AuthConfig::basic("erp-admin", "hunter2"))
        .with_company_id("co_42")
}

async fn mount_probe(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/company"))
        .and(header("Authorization", BASIC_HEADER))
        .and(header("X-Company-Id", "co_42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": "co_42", "name": "Nordwind Retail", "version": "11.2"},
        })))
        .mount(server)
        .await;
}

async fn connected_adapter(server: &MockServer) -> RetailAdapter {
    mount_probe(server).await;
    let adapter = RetailAdapter::new();
    assert!(adapter.connect(config(&server.uri())).await.unwrap());
    adapter
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_connect_sends_company_scope() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    let info = adapter.system_info();
    assert!(adapter.is_connected());
    assert_eq!(info.version, "11.2");
    assert!(!info.capabilities.contains(&ResourceType::Regions));
}

#[tokio::test]
async fn test_connect_requires_company_id() {
    let adapter = RetailAdapter::new();
    let config = ConnectionConfig::new(
        "https://erp.example.com",
        AuthConfig::basic("erp-admin", "hunter2"),
    );
    let err = adapter.connect(config).await.unwrap_err();
    assert!(matches!(err, AdapterError::InvalidConfiguration { .. }));
}

#[tokio::test]
async fn test_connect_bad_credentials_resolves_false() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/company"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad credentials"))
        .mount(&server)
        .await;

    let adapter = RetailAdapter::new();
    assert!(!adapter.connect(config(&server.uri())).await.unwrap());
    assert_eq!(adapter.system_info().status, ConnectionStatus::Error);
}

// =============================================================================
// Pagination and Status Synthesis
// =============================================================================

#[tokio::test]
async fn test_list_uses_one_indexed_pages() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "2"))
        .and(query_param("per_page", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "meta": {"total": 12},
        })))
        .expect(1)
        .mount(&server)
        .await;

    adapter
        .products()
        .list(&ListOptions::new().with_page(2).with_limit(10))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_list_synthesizes_status_from_active_flag() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 1, "name": "Lamp", "active": true},
                {"id": 2, "name": "Chair", "active": false},
            ],
            "meta": {"total": 2},
        })))
        .mount(&server)
        .await;

    let products = adapter.products().list(&ListOptions::new()).await.unwrap();
    assert_eq!(products[0]["status"], "active");
    assert_eq!(products[1]["status"], "inactive");
    // The backend's own flag is still visible.
    assert_eq!(products[0]["active"], true);
}

#[tokio::test]
async fn test_update_folds_status_back_into_active() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("PUT"))
        .and(path("/api/products/7"))
        .and(body_json(json!({"name": "Lamp", "active": false})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 7, "name": "Lamp", "active": false},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let updated = adapter
        .products()
        .update("7", json!({"name": "Lamp", "status": "inactive"}))
        .await
        .unwrap();
    assert_eq!(updated["status"], "inactive");
}

// =============================================================================
// Capability Negotiation
// =============================================================================

#[tokio::test]
async fn test_regions_are_not_supported() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    let err = adapter
        .regions()
        .list(&ListOptions::new())
        .await
        .unwrap_err();
    assert!(err.is_not_supported());
    assert_eq!(err.to_string(), "regional_erp does not support regions.list");

    let err = adapter.regions().get_by_country("de").await.unwrap_err();
    assert!(err.is_not_supported());
}

#[tokio::test]
async fn test_user_invites_are_not_supported() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    let err = adapter
        .users()
        .invite(json!({"email": "new@example.com"}))
        .await
        .unwrap_err();
    assert!(err.is_not_supported());
}

// =============================================================================
// Domain Operations
// =============================================================================

#[tokio::test]
async fn test_find_by_email_confirms_exact_match() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    // Free-text search can return near misses; only the exact address counts.
    Mock::given(method("GET"))
        .and(path("/api/customers"))
        .and(query_param("search", "ada@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"id": 11, "email": "ada@example.com.mx"},
                {"id": 12, "email": "ada@example.com"},
            ],
            "meta": {"total": 2},
        })))
        .mount(&server)
        .await;

    let found = adapter
        .customers()
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found["id"], 12);
}

#[tokio::test]
async fn test_order_status_update() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/orders/31/status"))
        .and(body_json(json!({"status": "shipped"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 31, "status": "shipped"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let order = adapter.orders().update_status("31", "shipped").await.unwrap();
    assert_eq!(order["id"], 31);
}

#[tokio::test]
async fn test_inventory_adjust_reports_numeric_ids() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/inventory/5/adjustments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {"id": 5, "quantity": 17},
        })))
        .mount(&server)
        .await;

    let outcomes = adapter
        .inventory()
        .adjust(vec![json!({"id": 5, "delta": -3}), json!({"delta": 2})])
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 2);
    assert!(outcomes[0].is_ok());
    assert_eq!(outcomes[0].id.as_deref(), Some("5"));
    // The second adjustment never named an item.
    assert!(!outcomes[1].is_ok());
    assert_eq!(outcomes[1].index, 1);
}

// =============================================================================
// Sync
// =============================================================================

#[tokio::test]
async fn test_sync_with_unsupported_group_is_partial() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"id": 1, "active": true}],
            "meta": {"total": 1},
        })))
        .mount(&server)
        .await;

    let options = SyncOptions::new()
        .with_resource_types(vec![ResourceType::Products, ResourceType::Regions]);
    let report = adapter.sync(options).await.unwrap();

    assert_eq!(report.status, SyncStatus::Partial);
    assert_eq!(report.records_processed(), 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].resource, ResourceType::Regions);
    assert!(report.errors[0].message.contains("does not support"));
}

// =============================================================================
// Stale Credentials
// =============================================================================
#[tokio::test]
async fn test_revoked_credentials_demote_adapter_to_error() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/orders"))
        .respond_with(ResponseTemplate::new(401).set_body_string("account locked"))
        .mount(&server)
        .await;

    let err = adapter
        .orders()
        .list(&ListOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::AuthenticationFailed));
    assert_eq!(adapter.system_info().status, ConnectionStatus::Error);
    assert!(!adapter.is_connected());
}
