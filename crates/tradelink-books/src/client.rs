//! Shared CRUD plumbing for the accounting resource groups.

use serde_json::Value;
use std::sync::Arc;

use tradelink_connector::adapter::AdapterCore;
use tradelink_connector::error::AdapterResult;
use tradelink_connector::options::ListOptions;
use tradelink_connector::types::ResourceType;

use crate::query::{collection_path, list_query, unwrap_collection};

/// One resource group's view of the OData API. Single records come back
/// bare, so only collections need unwrapping.
pub(crate) struct ODataClient {
    core: Arc<AdapterCore>,
    resource: ResourceType,
}

impl ODataClient {
    pub(crate) fn new(core: Arc<AdapterCore>, resource: ResourceType) -> Self {
        Self { core, resource }
    }

    pub(crate) fn core(&self) -> &AdapterCore {
        &self.core
    }

    pub(crate) fn path(&self) -> String {
        format!("/api/v1/{}", collection_path(self.resource))
    }

    pub(crate) fn item_path(&self, id: &str) -> String {
        format!("{}/{id}", self.path())
    }

    pub(crate) async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let body = self
            .core
            .get(&self.path(), &list_query(options))
            .await?;
        unwrap_collection(body)
    }

    pub(crate) async fn get(&self, id: &str) -> AdapterResult<Value> {
        self.core.get(&self.item_path(id), &[]).await
    }

    pub(crate) async fn create(&self, data: Value) -> AdapterResult<Value> {
        self.core.post(&self.path(), &data).await
    }

    pub(crate) async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        self.core.put(&self.item_path(id), &data).await
    }

    pub(crate) async fn delete(&self, id: &str) -> AdapterResult<()> {
        self.core.delete(&self.item_path(id)).await?;
        Ok(())
    }

    /// List with one extra equality filter applied.
    pub(crate) async fn list_where(
        &self,
        key: &str,
        value: &str,
        options: &ListOptions,
    ) -> AdapterResult<Vec<Value>> {
        let options = options.clone().with_filter(key, value);
        self.list(&options).await
    }
}
