//! Regions, taxes, users, and sales channels on the commerce backend.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use tradelink_connector::adapter::AdapterCore;
use tradelink_connector::api::{RegionsApi, SalesChannelsApi, TaxesApi, UsersApi};
use tradelink_connector::error::{AdapterError, AdapterResult};
use tradelink_connector::options::ListOptions;
use tradelink_connector::types::{BackendType, ResourceType};

use crate::client::ResourceClient;
use crate::query::{list_query, unwrap_collection, unwrap_record};

pub(crate) struct CommerceRegions {
    client: ResourceClient,
}

impl CommerceRegions {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ResourceClient::new(core, ResourceType::Regions),
        }
    }
}

#[async_trait]
impl RegionsApi for CommerceRegions {
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

    async fn get_by_country(&self, country_code: &str) -> AdapterResult<Value> {
        let options = ListOptions::new()
            .with_limit(1)
            .with_filter("country_code", country_code.to_lowercase());
        let mut matches = self.client.list(&options).await?;
        if matches.is_empty() {
            return Err(AdapterError::request_failed(
                404,
                format!("no region serves country '{country_code}'"),
            ));
        }
        Ok(matches.remove(0))
    }
}

pub(crate) struct CommerceTaxes {
    client: ResourceClient,
}

impl CommerceTaxes {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ResourceClient::new(core, ResourceType::Taxes),
        }
    }
}

#[async_trait]
impl TaxesApi for CommerceTaxes {
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

    async fn rates_for_region(&self, region_id: &str) -> AdapterResult<Vec<Value>> {
        let options = ListOptions::new().with_filter("region_id", region_id);
        self.client.list(&options).await
    }

    async fn calculate(&self, data: Value) -> AdapterResult<Value> {
        let body = self
            .client
            .core()
            .post("/admin/tax-rates/calculate", &data)
            .await?;
        unwrap_record(body, "calculation")
    }
}

pub(crate) struct CommerceUsers {
    client: ResourceClient,
}

impl CommerceUsers {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ResourceClient::new(core, ResourceType::Users),
        }
    }
}

#[async_trait]
impl UsersApi for CommerceUsers {
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

    async fn invite(&self, data: Value) -> AdapterResult<Value> {
        let body = self
            .client
            .core()
            .post("/admin/invites", &data)
            .await?;
        unwrap_record(body, "invite")
    }

    async fn set_role(&self, id: &str, role: &str) -> AdapterResult<Value> {
        self.client.update(id, json!({"role": role})).await
    }
}

pub(crate) struct CommerceSalesChannels {
    client: ResourceClient,
}

impl CommerceSalesChannels {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ResourceClient::new(core, ResourceType::SalesChannels),
        }
    }
}

#[async_trait]
impl SalesChannelsApi for CommerceSalesChannels {
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

    async fn add_products(&self, id: &str, product_ids: Vec<String>) -> AdapterResult<Value> {
        let path = format!("{}/products/batch", self.client.item_path(id));
        let body = self
            .client
            .core()
            .post(&path, &json!({"product_ids": product_ids}))
            .await?;
        unwrap_record(body, "sales_channel")
    }

    async fn remove_products(&self, id: &str, product_ids: Vec<String>) -> AdapterResult<Value> {
        let path = format!("{}/products/batch", self.client.item_path(id));
        let payload = json!({"product_ids": product_ids});
        let body = self
            .client
            .core()
            .request(reqwest::Method::DELETE, &path, &[], Some(&payload))
            .await?;
        unwrap_record(body, "sales_channel")
    }

    async fn list_products(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let path = format!("{}/products", self.client.item_path(id));
        let body = self
            .client
            .core()
            .get(&path, &list_query(options))
            .await?;
        unwrap_collection(body, "products")
    }
}
