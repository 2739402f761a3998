//! Products and variants on the commerce backend.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use tradelink_connector::adapter::AdapterCore;
use tradelink_connector::api::{ProductsApi, VariantsApi};
use tradelink_connector::error::AdapterResult;
use tradelink_connector::options::{BulkOutcome, ListOptions};
use tradelink_connector::types::{BackendType, ResourceType};

use crate::client::ResourceClient;
use crate::query::{record_id, unwrap_record};

pub(crate) struct CommerceProducts {
    client: ResourceClient,
}

impl CommerceProducts {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ResourceClient::new(core, ResourceType::Products),
        }
    }
}

#[async_trait]
impl ProductsApi for CommerceProducts {
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

    async fn bulk_create(&self, items: Vec<Value>) -> AdapterResult<Vec<BulkOutcome>> {
        // The admin API has no batch-create endpoint; items go one by one
        // and each keeps its own outcome at its input position.
        let mut outcomes = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match self.client.create(item).await {
                Ok(record) => {
                    let id = record_id(&record).unwrap_or_default();
                    outcomes.push(BulkOutcome::ok(index, id));
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

pub(crate) struct CommerceVariants {
    client: ResourceClient,
}

impl CommerceVariants {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ResourceClient::new(core, ResourceType::Variants),
        }
    }
}

#[async_trait]
impl VariantsApi for CommerceVariants {
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

    async fn list_by_product(
        &self,
        product_id: &str,
        options: &ListOptions,
    ) -> AdapterResult<Vec<Value>> {
        let path = format!("/admin/products/{product_id}/variants");
        let body = self
            .client
            .core()
            .get(&path, &crate::query::list_query(options))
            .await?;
        crate::query::unwrap_collection(body, "variants")
    }

    async fn update_prices(&self, id: &str, prices: Value) -> AdapterResult<Value> {
        let path = format!("{}/prices", self.client.item_path(id));
        let body = self.client.core().put(&path, &prices).await?;
        unwrap_record(body, "variant")
    }
}
