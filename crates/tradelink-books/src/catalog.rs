//! Items and item variants on the accounting platform.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use tradelink_connector::adapter::AdapterCore;
use tradelink_connector::api::{ProductsApi, VariantsApi};
use tradelink_connector::error::AdapterResult;
use tradelink_connector::options::{BulkOutcome, ListOptions};
use tradelink_connector::types::{BackendType, ResourceType};

use crate::client::ODataClient;
use crate::query::{list_query, record_id, unwrap_collection};

pub(crate) struct BooksProducts {
    client: ODataClient,
}

impl BooksProducts {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ODataClient::new(core, ResourceType::Products),
        }
    }
}

#[async_trait]
impl ProductsApi for BooksProducts {
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

    async fn bulk_create(&self, items: Vec<Value>) -> AdapterResult<Vec<BulkOutcome>> {
        let mut outcomes = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match self.client.create(item).await {
                Ok(record) => {
                    outcomes.push(BulkOutcome::ok(index, record_id(&record).unwrap_or_default()));
                }
                Err(err) => outcomes.push(BulkOutcome::failed(index, err.to_string())),
            }
        }
        Ok(outcomes)
    }

    async fn bulk_update(&self, items: Vec<(String, Value)>) -> AdapterResult<Vec<BulkOutcome>> {
        let mut outcomes = Vec::with_capacity(items.len());
        for (index, (id, data)) in items.into_iter().enumerate() {
            match self.client.update(&id, data).await {
                Ok(_) => outcomes.push(BulkOutcome::ok(index, id)),
                Err(err) => outcomes.push(BulkOutcome::failed(index, err.to_string())),
            }
        }
        Ok(outcomes)
    }
}

/// Item variants. The platform tracks these read-mostly; prices live on
/// the item itself, so `update_prices` keeps its unsupported default.
pub(crate) struct BooksVariants {
    client: ODataClient,
}

impl BooksVariants {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ODataClient::new(core, ResourceType::Variants),
        }
    }
}

#[async_trait]
impl VariantsApi for BooksVariants {
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

    async fn list_by_product(
        &self,
        product_id: &str,
        options: &ListOptions,
    ) -> AdapterResult<Vec<Value>> {
        let path = format!("/api/v1/items/{product_id}/variants");
        let body = self
            .client
            .core()
            .get(&path, &list_query(options))
            .await?;
        unwrap_collection(body)
    }
}
