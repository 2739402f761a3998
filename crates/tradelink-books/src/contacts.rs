//! Contacts and platform users on the accounting platform.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use tradelink_connector::adapter::AdapterCore;
use tradelink_connector::api::{CustomersApi, UsersApi};
use tradelink_connector::error::AdapterResult;
use tradelink_connector::options::ListOptions;
use tradelink_connector::types::{BackendType, ResourceType};

use crate::client::ODataClient;

/// Customers map onto the platform's contacts.
pub(crate) struct BooksCustomers {
    client: ODataClient,
}

impl BooksCustomers {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ODataClient::new(core, ResourceType::Customers),
        }
    }
}

#[async_trait]
impl CustomersApi for BooksCustomers {
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

    async fn find_by_email(&self, email: &str) -> AdapterResult<Option<Value>> {
        let options = ListOptions::new().with_limit(1);
        let mut matches = self.client.list_where("email", email, &options).await?;
        if matches.is_empty() {
            Ok(None)
        } else {
            Ok(Some(matches.remove(0)))
        }
    }

    async fn orders_for(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        // A contact's orders are their sales invoices.
        let options = options.clone().with_filter("contactId", id);
        let body = self
            .client
            .core()
            .get("/api/v1/invoices", &crate::query::list_query(&options))
            .await?;
        crate::query::unwrap_collection(body)
    }
}

/// Platform users. Roles are mutable; invitations are handled by the
/// platform's own console, so `invite` keeps its unsupported default.
pub(crate) struct BooksUsers {
    client: ODataClient,
}

impl BooksUsers {
    pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
        Self {
            client: ODataClient::new(core, ResourceType::Users),
        }
    }
}

#[async_trait]
impl UsersApi for BooksUsers {
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

    async fn set_role(&self, id: &str, role: &str) -> AdapterResult<Value> {
        self.client.update(id, json!({"role": role})).await
    }
}
