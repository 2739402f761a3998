//! Shared CRUD plumbing for the commerce resource groups.

use serde_json::Value;
use std::sync::Arc;

use tradelink_connector::adapter::AdapterCore;
use tradelink_connector::error::AdapterResult;
use tradelink_connector::options::ListOptions;
use tradelink_connector::types::ResourceType;

use crate::query::{
    collection_key, collection_path, list_query, record_key, unwrap_collection, unwrap_record,
};

/// One resource group's view of the admin API. Every call goes through the
/// adapter's executor, so it fails with `NotConnected` until a handshake
/// succeeded.
pub(crate) struct ResourceClient {
    core: Arc<AdapterCore>,
    resource: ResourceType,
}

impl ResourceClient {
    pub(crate) fn new(core: Arc<AdapterCore>, resource: ResourceType) -> Self {
        Self { core, resource }
    }

    pub(crate) fn core(&self) -> &AdapterCore {
        &self.core
    }

    pub(crate) fn path(&self) -> String {
        format!("/admin/{}", collection_path(self.resource))
    }

    pub(crate) fn item_path(&self, id: &str) -> String {
        format!("{}/{id}", self.path())
    }

    pub(crate) async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let body = self
            .core
            .get(&self.path(), &list_query(options))
            .await?;
        unwrap_collection(body, collection_key(self.resource))
    }

    pub(crate) async fn get(&self, id: &str) -> AdapterResult<Value> {
        let body = self.core.get(&self.item_path(id), &[]).await?;
        unwrap_record(body, record_key(self.resource))
    }

    pub(crate) async fn create(&self, data: Value) -> AdapterResult<Value> {
        let body = self.core.post(&self.path(), &data).await?;
        unwrap_record(body, record_key(self.resource))
    }

    pub(crate) async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        let body = self.core.put(&self.item_path(id), &data).await?;
        unwrap_record(body, record_key(self.resource))
    }

    pub(crate) async fn delete(&self, id: &str) -> AdapterResult<()> {
        self.core.delete(&self.item_path(id)).await?;
        Ok(())
    }

    /// GET a sub-path under one record, unwrapping the given collection key.
    pub(crate) async fn sub_collection(
        &self,
        id: &str,
        sub: &str,
        key: &str,
        options: &ListOptions,
    ) -> AdapterResult<Vec<Value>> {
        let path = format!("{}/{sub}", self.item_path(id));
        let body = self
            .core
            .get(&path, &list_query(options))
            .await?;
        unwrap_collection(body, key)
    }
}
