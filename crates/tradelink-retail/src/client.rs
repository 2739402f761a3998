//! Shared CRUD plumbing for the retail ERP resource groups.

use serde_json::Value;
use std::sync::Arc;

use tradelink_connector::adapter::AdapterCore;
use tradelink_connector::error::AdapterResult;
use tradelink_connector::options::ListOptions;
use tradelink_connector::types::ResourceType;

use crate::query::{
    collection_path, denormalize_record, list_query, unwrap_collection, unwrap_record,
};

/// One resource group's view of the ERP API. Outbound payloads are
/// denormalized (`status` folded into `active`) and inbound records are
/// normalized back.
pub(crate) struct ErpClient {
    core: Arc<AdapterCore>,
    resource: ResourceType,
}

impl ErpClient {
    pub(crate) fn new(core: Arc<AdapterCore>, resource: ResourceType) -> Self {
        Self { core, resource }
    }

    pub(crate) fn core(&self) -> &AdapterCore {
        &self.core
    }

    pub(crate) fn path(&self) -> String {
        format!("/api/{}", collection_path(self.resource))
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
        let body = self.core.get(&self.item_path(id), &[]).await?;
        unwrap_record(body)
    }

    pub(crate) async fn create(&self, data: Value) -> AdapterResult<Value> {
        let body = self
            .core
            .post(&self.path(), &denormalize_record(data))
            .await?;
        unwrap_record(body)
    }

    pub(crate) async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        let body = self
            .core
            .put(&self.item_path(id), &denormalize_record(data))
            .await?;
        unwrap_record(body)
    }

    pub(crate) async fn delete(&self, id: &str) -> AdapterResult<()> {
        self.core.delete(&self.item_path(id)).await?;
        Ok(())
    }

    /// GET a sub-path under one record, unwrapping the `data` envelope.
    pub(crate) async fn sub_collection(
        &self,
        id: &str,
        sub: &str,
        options: &ListOptions,
    ) -> AdapterResult<Vec<Value>> {
        let path = format!("{}/{sub}", self.item_path(id));
        let body = self
            .core
            .get(&path, &list_query(options))
            .await?;
        unwrap_collection(body)
    }

    /// POST to a sub-path under one record, unwrapping the `data` envelope.
    pub(crate) async fn sub_post(&self, id: &str, sub: &str, data: &Value) -> AdapterResult<Value> {
        let path = format!("{}/{sub}", self.item_path(id));
        let body = self.core.post(&path, data).await?;
        unwrap_record(body)
    }
}
