//! Integration tests for the commerce adapter using wiremock.
//!
//! These tests verify the adapter against a mock admin API, covering the
//! connect handshake, pagination translation, envelope unwrapping, bulk
//! outcome ordering, and sync reporting.

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use tradelink_commerce::CommerceAdapter;
use tradelink_connector::adapter::BackofficeAdapter;
use tradelink_connector::config::{AuthConfig, ConnectionConfig};
use tradelink_connector::error::AdapterError;
use tradelink_connector::options::{ListOptions, SyncOptions, SyncStatus};
use tradelink_connector::types::{ConnectionStatus, ResourceType};

// =============================================================================
// Test Helpers
// =============================================================================

const API_KEY: &str = "sk_test_123";

fn config(base_url: &str) -> ConnectionConfig {
    ConnectionConfig::new(base_url, AuthConfig::api_key(API_KEY))
}

async fn mount_probe(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/admin/system"))
        .and(header("x-api-key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "2.4.1"})))
        .mount(server)
        .await;
}

async fn connected_adapter(server: &MockServer) -> CommerceAdapter {
    mount_probe(server).await;
    let adapter = CommerceAdapter::new();
    assert!(adapter.connect(config(&server.uri())).await.unwrap());
    adapter
}

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_connect_records_backend_version() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    let info = adapter.system_info();
    assert!(adapter.is_connected());
    assert_eq!(info.version, "2.4.1");
    assert_eq!(info.status, ConnectionStatus::Connected);
    assert!(info.response_time_ms.is_some());
}

#[tokio::test]
async fn test_connect_rejected_key_resolves_false() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/admin/system"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let adapter = CommerceAdapter::new();
    let connected = adapter.connect(config(&server.uri())).await.unwrap();
    assert!(!connected);
    assert_eq!(adapter.system_info().status, ConnectionStatus::Error);

    // Resource calls now fail fast.
    let err = adapter
        .products()
        .list(&ListOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::NotConnected));
}

#[tokio::test]
async fn test_connect_requires_api_key_auth() {
    let adapter = CommerceAdapter::new();
    let config = ConnectionConfig::new(
        "https://shop.example.com",
        AuthConfig::basic("admin", "secret"),
    );
    let err = adapter.connect(config).await.unwrap_err();
    assert!(matches!(err, AdapterError::InvalidConfiguration { .. }));
}

#[tokio::test]
async fn test_test_connection_before_connect_uses_stored_config() {
    let server = MockServer::start().await;
    let adapter = CommerceAdapter::new();

    // No config yet: the probe fails without touching the network.
    let probe = adapter.test_connection().await;
    assert!(!probe.success);

    // After a failed connect the stored config is probed directly.
    Mock::given(method("GET"))
        .and(path("/admin/system"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;
    adapter.connect(config(&server.uri())).await.unwrap();
    let probe = adapter.test_connection().await;
    assert!(!probe.success);
    assert!(probe.message.contains("503"));
}

// =============================================================================
// Pagination and Listing
// =============================================================================

#[tokio::test]
async fn test_products_list_first_page_of_five() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .and(query_param("limit", "5"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [
                {"id": "prod_1"}, {"id": "prod_2"}, {"id": "prod_3"},
                {"id": "prod_4"}, {"id": "prod_5"},
            ],
            "count": 37,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let products = adapter
        .products()
        .list(&ListOptions::new().with_page(1).with_limit(5))
        .await
        .unwrap();
    assert_eq!(products.len(), 5);
    assert_eq!(products[0]["id"], "prod_1");
}

#[tokio::test]
async fn test_page_two_translates_to_offset() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("GET"))
        .and(path("/admin/customers"))
        .and(query_param("limit", "10"))
        .and(query_param("offset", "10"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"customers": [], "count": 10})),
        )
        .expect(1)
        .mount(&server)
        .await;

    adapter
        .customers()
        .list(&ListOptions::new().with_page(2).with_limit(10))
        .await
        .unwrap();
}

// =============================================================================
// CRUD and Domain Operations
// =============================================================================

#[tokio::test]
async fn test_product_get_unwraps_envelope() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("GET"))
        .and(path("/admin/products/prod_1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "product": {"id": "prod_1", "title": "Desk Lamp"},
        })))
        .mount(&server)
        .await;

    let product = adapter.products().get("prod_1").await.unwrap();
    assert_eq!(product["title"], "Desk Lamp");
}

#[tokio::test]
async fn test_order_update_status() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("PUT"))
        .and(path("/admin/orders/order_1"))
        .and(body_json(json!({"status": "shipped"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "order": {"id": "order_1", "status": "shipped"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    let order = adapter
        .orders()
        .update_status("order_1", "shipped")
        .await
        .unwrap();
    assert_eq!(order["status"], "shipped");
}

#[tokio::test]
async fn test_customer_find_by_email() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("GET"))
        .and(path("/admin/customers"))
        .and(query_param("email", "ada@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customers": [{"id": "cus_1", "email": "ada@example.com"}],
            "count": 1,
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/customers"))
        .and(query_param("email", "nobody@example.com"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"customers": [], "count": 0})),
        )
        .mount(&server)
        .await;

    let found = adapter
        .customers()
        .find_by_email("ada@example.com")
        .await
        .unwrap();
    assert_eq!(found.unwrap()["id"], "cus_1");

    let missing = adapter
        .customers()
        .find_by_email("nobody@example.com")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_sales_channel_remove_products_sends_delete_body() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("DELETE"))
        .and(path("/admin/sales-channels/sc_1/products/batch"))
        .and(body_json(json!({"product_ids": ["prod_1", "prod_2"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "sales_channel": {"id": "sc_1"},
        })))
        .expect(1)
        .mount(&server)
        .await;

    adapter
        .sales_channels()
        .remove_products("sc_1", vec!["prod_1".into(), "prod_2".into()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_backend_error_body_travels_verbatim() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("GET"))
        .and(path("/admin/products/prod_404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string(r#"{"error":"product not found"}"#),
        )
        .mount(&server)
        .await;

    let err = adapter.products().get("prod_404").await.unwrap_err();
    match err {
        AdapterError::RequestFailed { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, r#"{"error":"product not found"}"#);
        }
        other => panic!("expected RequestFailed, got {other:?}"),
    }
}

// =============================================================================
// Bulk Operations
// =============================================================================

#[tokio::test]
async fn test_bulk_create_outcomes_keep_input_order() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("POST"))
        .and(path("/admin/products"))
        .and(body_json(json!({"sku": "A"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"product": {"id": "prod_a"}})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/products"))
        .and(body_json(json!({"sku": "B"})))
        .respond_with(ResponseTemplate::new(422).set_body_string("sku already taken"))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/admin/products"))
        .and(body_json(json!({"sku": "C"})))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"product": {"id": "prod_c"}})),
        )
        .mount(&server)
        .await;

    let outcomes = adapter
        .products()
        .bulk_create(vec![
            json!({"sku": "A"}),
            json!({"sku": "B"}),
            json!({"sku": "C"}),
        ])
        .await
        .unwrap();

    assert_eq!(outcomes.len(), 3);
    assert!(outcomes[0].is_ok());
    assert_eq!(outcomes[0].id.as_deref(), Some("prod_a"));
    // The failed item holds its input position and carries the backend's
    // diagnostic; the item after it was still attempted.
    assert!(!outcomes[1].is_ok());
    assert_eq!(outcomes[1].index, 1);
    assert!(outcomes[1].error.as_deref().unwrap().contains("sku already taken"));
    assert!(outcomes[2].is_ok());
    assert_eq!(outcomes[2].id.as_deref(), Some("prod_c"));
}

// =============================================================================
// Sync
// =============================================================================

#[tokio::test]
async fn test_sync_default_groups_completed() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"id": "prod_1"}, {"id": "prod_2"}],
            "count": 2,
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/customers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "customers": [{"id": "cus_1"}],
            "count": 1,
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/orders"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"orders": [], "count": 0})),
        )
        .mount(&server)
        .await;

    let report = adapter.sync(SyncOptions::new()).await.unwrap();
    assert_eq!(report.status, SyncStatus::Completed);
    assert_eq!(report.records_processed(), 3);
    assert!(adapter.system_info().last_sync.is_some());
    assert_eq!(adapter.sync_status().unwrap().id, report.id);
}

#[tokio::test]
async fn test_sync_isolates_failing_group() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "products": [{"id": "prod_1"}],
            "count": 1,
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/customers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/orders"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"orders": [], "count": 0})),
        )
        .mount(&server)
        .await;

    let report = adapter.sync(SyncOptions::new()).await.unwrap();
    assert_eq!(report.status, SyncStatus::Partial);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].resource, ResourceType::Customers);
}

// =============================================================================
// Platform Operations
// =============================================================================

#[tokio::test]
async fn test_custom_request_passes_through() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    Mock::given(method("POST"))
        .and(path("/admin/price-lists"))
        .and(body_json(json!({"name": "Winter Sale"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"price_list": {"id": "pl_1"}})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let body = adapter
        .custom_request("POST", "/admin/price-lists", Some(json!({"name": "Winter Sale"})))
        .await
        .unwrap();
    assert_eq!(body["price_list"]["id"], "pl_1");
}

#[tokio::test]
async fn test_handle_webhook_normalizes_payload() {
    let adapter = CommerceAdapter::new();
    let normalized = adapter
        .handle_webhook(json!({
            "event": "order.placed",
            "data": {"id": "order_9", "total": 4200},
        }))
        .await
        .unwrap();
    assert_eq!(normalized["event"], "order.placed");
    assert_eq!(normalized["id"], "order_9");

    let err = adapter.handle_webhook(json!({"data": {}})).await.unwrap_err();
    assert!(matches!(err, AdapterError::InvalidResponse { .. }));
}

// =============================================================================
// Stale Credentials
// =============================================================================
#[tokio::test]
async fn test_revoked_key_demotes_adapter_to_error() {
    let server = MockServer::start().await;
    let adapter = connected_adapter(&server).await;

    // The key was revoked server-side after the handshake.
    Mock::given(method("GET"))
        .and(path("/admin/products"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = adapter
        .products()
        .list(&ListOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::AuthenticationFailed));
    assert_eq!(adapter.system_info().status, ConnectionStatus::Error);
    assert!(!adapter.is_connected());

    // The dropped executor makes later calls fail fast.
    let err = adapter
        .products()
        .list(&ListOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AdapterError::NotConnected));
}
