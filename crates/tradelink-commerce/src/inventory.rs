//! Inventory items and stock locations on the commerce backend.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use tradelink_connector::adapter::AdapterCore;
use tradelink_connector::api::{InventoryApi, WarehousesApi};
use tradelink_connector::error::AdapterResult;
use tradelink_connector::options::{BulkOutcome, ListOptions};
use tradelink_connector::types::{BackendType, ResourceType};

use crate::client::ResourceClient;
use crate::query::unwrap_record;

pub(crate) struct CommerceInventory {
    client: ResourceClient,
}

impl CommerceInventory {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ResourceClient::new(core, ResourceType::Inventory),
        }
    }
}

#[async_trait]
impl InventoryApi for CommerceInventory {
    fn backend(&self) -> BackendType {
        BackendType::Commerce
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
        let path = format!("{}/stock", self.client.item_path(id));
        let body = self.client.core().get(&path, &[]).await?;
        unwrap_record(body, "stock")
    }

    async fn adjust(&self, adjustments: Vec<Value>) -> AdapterResult<Vec<BulkOutcome>> {
        let mut outcomes = Vec::with_capacity(adjustments.len());
        for (index, adjustment) in adjustments.into_iter().enumerate() {
            let Some(id) = adjustment.get("id").and_then(Value::as_str).map(str::to_string)
            else {
                outcomes.push(BulkOutcome::failed(index, "adjustment is missing 'id'"));
                continue;
            };
            let path = format!("{}/adjustments", self.client.item_path(&id));
            match self.client.core().post(&path, &adjustment).await {
                Ok(_) => outcomes.push(BulkOutcome::ok(index, id)),
                Err(err) => outcomes.push(BulkOutcome::failed(index, err.to_string())),
            }
        }
        Ok(outcomes)
    }

    async fn movements(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        self.client
            .sub_collection(id, "movements", "movements", options)
            .await
    }
}

pub(crate) struct CommerceWarehouses {
    client: ResourceClient,
}

impl CommerceWarehouses {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ResourceClient::new(core, ResourceType::Warehouses),
        }
    }
}

#[async_trait]
impl WarehousesApi for CommerceWarehouses {
    fn backend(&self) -> BackendType {
        BackendType::Commerce
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

    async fn stock_levels(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        self.client
            .sub_collection(id, "levels", "stock_levels", options)
            .await
    }

    async fn set_default(&self, id: &str) -> AdapterResult<Value> {
        let path = format!("{}/default", self.client.item_path(id));
        let body = self
            .client
            .core()
            .post(&path, &Value::Null)
            .await?;
        unwrap_record(body, "stock_location")
    }
}
