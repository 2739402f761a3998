//! Invoices, taxes, jurisdictions, and stock on the accounting platform.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use tradelink_connector::adapter::AdapterCore;
use tradelink_connector::api::{InventoryApi, OrdersApi, RegionsApi, TaxesApi};
use tradelink_connector::error::{AdapterError, AdapterResult};
use tradelink_connector::options::{BulkOutcome, ListOptions};
use tradelink_connector::types::{BackendType, ResourceType};

use crate::client::ODataClient;
use crate::query::record_id;

/// Orders map onto the platform's sales invoices. An order's "invoice"
/// is the record itself, so `invoice` is a plain read.
pub(crate) struct BooksOrders {
    client: ODataClient,
}

impl BooksOrders {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ODataClient::new(core, ResourceType::Orders),
        }
    }
}

#[async_trait]
impl OrdersApi for BooksOrders {
    fn backend(&self) -> BackendType {
        BackendType::Accounting
    }

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        self.client.list(options).await
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        self.client.get(id).await
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        self.client.create(data).await
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        self.client.update(id, data).await
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        self.client.delete(id).await
    }

    async fn update_status(&self, id: &str, status: &str) -> AdapterResult<Value> {
        let path = format!("{}/status", self.client.item_path(id));
        self.client
            .core()
            .post(&path, &json!({"status": status}))
            .await
    }

    async fn add_payment(&self, id: &str, payment: Value) -> AdapterResult<Value> {
        let mut payment = payment;
        if let Some(map) = payment.as_object_mut() {
            map.insert("invoiceId".to_string(), json!(id));
        }
        self.client
            .core()
            .post("/api/v1/payments", &payment)
            .await
    }

    async fn refund(&self, id: &str, refund: Value) -> AdapterResult<Value> {
        // Refunds are credit notes raised against the invoice.
        let mut refund = refund;
        if let Some(map) = refund.as_object_mut() {
            map.insert("invoiceId".to_string(), json!(id));
        }
        self.client
            .core()
            .post("/api/v1/creditnotes", &refund)
            .await
    }

    async fn invoice(&self, id: &str) -> AdapterResult<Value> {
        self.client.get(id).await
    }
}

pub(crate) struct BooksTaxes {
    client: ODataClient,
}

impl BooksTaxes {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ODataClient::new(core, ResourceType::Taxes),
        }
    }
}

#[async_trait]
impl TaxesApi for BooksTaxes {
    fn backend(&self) -> BackendType {
        BackendType::Accounting
    }

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        self.client.list(options).await
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        self.client.get(id).await
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        self.client.create(data).await
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        self.client.update(id, data).await
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        self.client.delete(id).await
    }

    async fn rates_for_region(&self, region_id: &str) -> AdapterResult<Vec<Value>> {
        self.client
            .list_where("jurisdictionId", region_id, &ListOptions::new())
            .await
    }

    async fn calculate(&self, data: Value) -> AdapterResult<Value> {
        self.client
            .core()
            .post("/api/v1/taxrates/calculate", &data)
            .await
    }
}

/// Regions map onto the platform's tax jurisdictions.
pub(crate) struct BooksRegions {
    client: ODataClient,
}

impl BooksRegions {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ODataClient::new(core, ResourceType::Regions),
        }
    }
}

#[async_trait]
impl RegionsApi for BooksRegions {
    fn backend(&self) -> BackendType {
        BackendType::Accounting
    }

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        self.client.list(options).await
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        self.client.get(id).await
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        self.client.create(data).await
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        self.client.update(id, data).await
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        self.client.delete(id).await
    }

    async fn get_by_country(&self, country_code: &str) -> AdapterResult<Value> {
        let options = ListOptions::new().with_limit(1);
        let mut matches = self
            .client
            .list_where("countryCode", &country_code.to_uppercase(), &options)
            .await?;
        if matches.is_empty() {
            return Err(AdapterError::request_failed(
                404,
                format!("no jurisdiction covers country '{country_code}'"),
            ));
        }
        Ok(matches.remove(0))
    }
}

pub(crate) struct BooksInventory {
    client: ODataClient,
}

impl BooksInventory {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ODataClient::new(core, ResourceType::Inventory),
        }
    }
}

#[async_trait]
impl InventoryApi for BooksInventory {
    fn backend(&self) -> BackendType {
        BackendType::Accounting
    }

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        self.client.list(options).await
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        self.client.get(id).await
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        self.client.create(data).await
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        self.client.update(id, data).await
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        self.client.delete(id).await
    }

    async fn update_quantity(&self, id: &str, quantity: i64) -> AdapterResult<Value> {
        self.client.update(id, json!({"quantity": quantity})).await
    }

    async fn stock(&self, id: &str) -> AdapterResult<Value> {
        self.client.get(id).await
    }

    async fn adjust(&self, adjustments: Vec<Value>) -> AdapterResult<Vec<BulkOutcome>> {
        let mut outcomes = Vec::with_capacity(adjustments.len());
        for (index, adjustment) in adjustments.into_iter().enumerate() {
            let Some(id) = record_id(&adjustment) else {
                outcomes.push(BulkOutcome::failed(index, "adjustment is missing 'id'"));
                continue;
            };
            let result = self
                .client
                .core()
                .post("/api/v1/stockadjustments", &adjustment)
                .await;
            match result {
                Ok(_) => outcomes.push(BulkOutcome::ok(index, id)),
                Err(err) => outcomes.push(BulkOutcome::failed(index, err.to_string())),
            }
        }
        Ok(outcomes)
    }

    async fn movements(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let path = format!("{}/movements", self.client.item_path(id));
        let body = self
            .client
            .core()
            .get(&path, &crate::query::list_query(options))
            .await?;
        crate::query::unwrap_collection(body)
    }
}
