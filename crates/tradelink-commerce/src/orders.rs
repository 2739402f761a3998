//! Customers and orders on the commerce backend.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use tradelink_connector::adapter::AdapterCore;
use tradelink_connector::api::{CustomersApi, OrdersApi};
use tradelink_connector::error::AdapterResult;
use tradelink_connector::options::{ListOptions, SortOrder};
use tradelink_connector::types::{BackendType, ResourceType};

use crate::client::ResourceClient;
use crate::query::unwrap_record;

pub(crate) struct CommerceCustomers {
    client: ResourceClient,
}

impl CommerceCustomers {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ResourceClient::new(core, ResourceType::Customers),
        }
    }
}

#[async_trait]
impl CustomersApi for CommerceCustomers {
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

    async fn find_by_email(&self, email: &str) -> AdapterResult<Option<Value>> {
        let options = ListOptions::new().with_limit(1).with_filter("email", email);
        let mut matches = self.client.list(&options).await?;
        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches.remove(0)))
        }
    }

    async fn orders_for(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        self.client
            .sub_collection(id, "orders", "orders", options)
            .await
    }
}

pub(crate) struct CommerceOrders {
    client: ResourceClient,
}

impl CommerceOrders {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ResourceClient::new(core, ResourceType::Orders),
        }
    }
}

#[async_trait]
impl OrdersApi for CommerceOrders {
    fn backend(&self) -> BackendType {
        BackendType::Commerce
    }

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        // Orders default to newest-first when the caller does not sort.
        let options = if options.sort_by.is_none() {
            options.clone().with_sort("created_at", SortOrder::Desc)
        } else {
            options.clone()
        };
        self.client.list(&options).await
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
        self.client.update(id, json!({"status": status})).await
    }

    async fn add_payment(&self, id: &str, payment: Value) -> AdapterResult<Value> {
        let path = format!("{}/payments", self.client.item_path(id));
        let body = self.client.core().post(&path, &payment).await?;
        unwrap_record(body, "order")
    }

    async fn refund(&self, id: &str, refund: Value) -> AdapterResult<Value> {
        let path = format!("{}/refunds", self.client.item_path(id));
        let body = self.client.core().post(&path, &refund).await?;
        unwrap_record(body, "order")
    }

    async fn invoice(&self, id: &str) -> AdapterResult<Value> {
        let path = format!("{}/invoice", self.client.item_path(id));
        let body = self.client.core().get(&path, &[]).await?;
        unwrap_record(body, "invoice")
    }
}
