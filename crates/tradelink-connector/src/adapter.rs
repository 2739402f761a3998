//! Adapter contract and shared connection state
//!
//! `BackofficeAdapter` is the one trait callers program against: lifecycle,
//! the ten resource group accessors, sync, and the optional platform
//! operations. `AdapterCore` carries the state every concrete adapter
//! needs (system info, active config, request executor, last sync report)
//! so the adapter crates only implement wire translation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};

use crate::api::{
    CustomersApi, InventoryApi, OrdersApi, ProductsApi, RegionsApi, SalesChannelsApi, TaxesApi,
    UsersApi, VariantsApi, WarehousesApi,
};
use crate::config::ConnectionConfig;
use crate::error::{AdapterError, AdapterResult};
use crate::executor::RequestExecutor;
use crate::options::{BulkOutcome, ConnectionTest, ListOptions, SyncOptions, SyncReport};
use crate::types::{BackendType, ConnectionStatus, ResourceType, SystemInfo};

/// Uniform contract over one back-office backend.
///
/// Lifecycle errors do not propagate out of `connect`: a failed handshake
/// resolves to `Ok(false)` with the adapter left in the `Error` status, so
/// callers branch on the result instead of catching. Operations called
/// before a successful `connect` fail with `NotConnected`.
#[async_trait]
pub trait BackofficeAdapter: Send + Sync {
    /// Backend kind this adapter talks to.
    fn backend_type(&self) -> BackendType;

    /// Snapshot of the adapter's identity and live status.
    fn system_info(&self) -> SystemInfo;

    /// Whether the last lifecycle transition left the adapter connected.
    fn is_connected(&self) -> bool;

    /// Validate the config, perform the backend handshake, and go live.
    ///
    /// Returns `Ok(true)` on success and `Ok(false)` when the handshake is
    /// rejected (bad credentials, unreachable host), leaving the status at
    /// `Error`. Only a structurally invalid config is an `Err`.
    async fn connect(&self, config: ConnectionConfig) -> AdapterResult<bool>;

    /// Drop the live connection. Idempotent: disconnecting an adapter that
    /// never connected is `Ok(true)`.
    async fn disconnect(&self) -> AdapterResult<bool>;

    /// Read-only reachability probe. Never mutates connection state and
    /// never fails: an unreachable backend yields a failed `ConnectionTest`.
    async fn test_connection(&self) -> ConnectionTest;

    fn products(&self) -> &dyn ProductsApi;
    fn variants(&self) -> &dyn VariantsApi;
    fn regions(&self) -> &dyn RegionsApi;
    fn taxes(&self) -> &dyn TaxesApi;
    fn users(&self) -> &dyn UsersApi;
    fn customers(&self) -> &dyn CustomersApi;
    fn orders(&self) -> &dyn OrdersApi;
    fn sales_channels(&self) -> &dyn SalesChannelsApi;
    fn inventory(&self) -> &dyn InventoryApi;
    fn warehouses(&self) -> &dyn WarehousesApi;

    /// List one resource group by name. This is the dispatch the sync
    /// orchestrator drives; adapters get it for free.
    async fn list_resource(
        &self,
        resource: ResourceType,
        options: &ListOptions,
    ) -> AdapterResult<Vec<Value>> {
        match resource {
            ResourceType::Products => self.products().list(options).await,
            ResourceType::Variants => self.variants().list(options).await,
            ResourceType::Regions => self.regions().list(options).await,
            ResourceType::Taxes => self.taxes().list(options).await,
            ResourceType::Users => self.users().list(options).await,
            ResourceType::Customers => self.customers().list(options).await,
            ResourceType::Orders => self.orders().list(options).await,
            ResourceType::SalesChannels => self.sales_channels().list(options).await,
            ResourceType::Inventory => self.inventory().list(options).await,
            ResourceType::Warehouses => self.warehouses().list(options).await,
        }
    }

    /// Run a sync pass over the requested resource groups.
    async fn sync(&self, options: SyncOptions) -> AdapterResult<SyncReport>;

    /// The report of the most recent sync run, if any.
    fn sync_status(&self) -> Option<SyncReport>;

    /// Register webhook subscriptions with the backend.
    async fn setup_webhooks(&self, config: Value) -> AdapterResult<Value> {
        let _ = config;
        Err(AdapterError::not_supported(
            self.backend_type(),
            "setup_webhooks",
        ))
    }

    /// Interpret one inbound webhook payload.
    async fn handle_webhook(&self, payload: Value) -> AdapterResult<Value> {
        let _ = payload;
        Err(AdapterError::not_supported(
            self.backend_type(),
            "handle_webhook",
        ))
    }

    /// Import many records of one resource group, per-item outcomes in
    /// input order.
    async fn bulk_import(
        &self,
        resource: ResourceType,
        items: Vec<Value>,
    ) -> AdapterResult<Vec<BulkOutcome>> {
        let _ = (resource, items);
        Err(AdapterError::not_supported(
            self.backend_type(),
            "bulk_import",
        ))
    }

    /// Export records of one resource group.
    async fn bulk_export(
        &self,
        resource: ResourceType,
        options: &ListOptions,
    ) -> AdapterResult<Vec<Value>> {
        let _ = (resource, options);
        Err(AdapterError::not_supported(
            self.backend_type(),
            "bulk_export",
        ))
    }

    /// Escape hatch: issue a raw request through the adapter's executor.
    async fn custom_request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> AdapterResult<Value> {
        let _ = (method, path, body);
        Err(AdapterError::not_supported(
            self.backend_type(),
            "custom_request",
        ))
    }
}

/// Shared state for concrete adapters.
///
/// Locks are plain `std::sync` guards, never held across an await point.
pub struct AdapterCore {
    info: RwLock<SystemInfo>,
    config: RwLock<Option<ConnectionConfig>>,
    executor: RwLock<Option<Arc<RequestExecutor>>>,
    last_report: RwLock<Option<SyncReport>>,
}

impl AdapterCore {
    /// State for a freshly instantiated, disconnected adapter.
    pub fn new(
        name: impl Into<String>,
        backend: BackendType,
        capabilities: Vec<ResourceType>,
    ) -> Self {
        Self {
            info: RwLock::new(SystemInfo::new(name, backend, capabilities)),
            config: RwLock::new(None),
            executor: RwLock::new(None),
            last_report: RwLock::new(None),
        }
    }

    fn read_info(&self) -> std::sync::RwLockReadGuard<'_, SystemInfo> {
        self.info.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_info(&self) -> std::sync::RwLockWriteGuard<'_, SystemInfo> {
        self.info.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Snapshot of the current system info.
    pub fn system_info(&self) -> SystemInfo {
        self.read_info().clone()
    }

    pub fn backend(&self) -> BackendType {
        self.read_info().backend
    }

    pub fn is_connected(&self) -> bool {
        self.read_info().status == ConnectionStatus::Connected
    }

    /// The active config, present from the first `connect` attempt onward.
    pub fn config(&self) -> Option<ConnectionConfig> {
        self.config
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The live executor, or `NotConnected` before a successful connect.
    pub fn executor(&self) -> AdapterResult<Arc<RequestExecutor>> {
        self.executor
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(AdapterError::NotConnected)
    }

    /// GET through the live executor, watching the outcome.
    pub async fn get(&self, path: &str, query: &[(String, String)]) -> AdapterResult<Value> {
        let result = self.executor()?.get(path, query).await;
        self.observe(result)
    }

    /// POST through the live executor, watching the outcome.
    pub async fn post(&self, path: &str, body: &Value) -> AdapterResult<Value> {
        let result = self.executor()?.post(path, body).await;
        self.observe(result)
    }

    /// PUT through the live executor, watching the outcome.
    pub async fn put(&self, path: &str, body: &Value) -> AdapterResult<Value> {
        let result = self.executor()?.put(path, body).await;
        self.observe(result)
    }

    /// DELETE through the live executor, watching the outcome.
    pub async fn delete(&self, path: &str) -> AdapterResult<Value> {
        let result = self.executor()?.delete(path).await;
        self.observe(result)
    }

    /// Arbitrary request through the live executor, watching the outcome.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        body: Option<&Value>,
    ) -> AdapterResult<Value> {
        let result = self.executor()?.request(method, path, query, body).await;
        self.observe(result)
    }

    /// An authentication failure that survived the executor's re-auth pass
    /// means the stored credentials have gone stale: the adapter drops to
    /// the `Error` state and the executor is discarded.
    fn observe<T>(&self, result: AdapterResult<T>) -> AdapterResult<T> {
        if let Err(ref err) = result {
            if err.is_auth() {
                self.set_error();
            }
        }
        result
    }

    /// Record the start of a connect attempt.
    pub fn set_connecting(&self, config: ConnectionConfig) {
        *self.config.write().unwrap_or_else(PoisonError::into_inner) = Some(config);
        self.write_info().status = ConnectionStatus::Connecting;
    }

    /// Record a successful handshake.
    pub fn set_connected(
        &self,
        executor: Arc<RequestExecutor>,
        version: impl Into<String>,
        response_time_ms: u64,
    ) {
        *self
            .executor
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(executor);
        let mut info = self.write_info();
        info.status = ConnectionStatus::Connected;
        info.version = version.into();
        info.response_time_ms = Some(response_time_ms);
    }

    /// Record a failed handshake or a stale-credential detection. The
    /// executor is dropped so later calls fail with `NotConnected`.
    pub fn set_error(&self) {
        *self
            .executor
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        self.write_info().status = ConnectionStatus::Error;
    }

    /// Record a disconnect.
    pub fn set_disconnected(&self) {
        *self
            .executor
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
        self.write_info().status = ConnectionStatus::Disconnected;
    }

    /// Record that a sync run made progress.
    pub fn mark_synced(&self, at: DateTime<Utc>) {
        self.write_info().last_sync = Some(at);
    }

    /// Store the report of a finished sync run.
    pub fn store_report(&self, report: SyncReport) {
        *self
            .last_report
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(report);
    }

    /// The report of the most recent sync run.
    pub fn last_report(&self) -> Option<SyncReport> {
        self.last_report
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl std::fmt::Debug for AdapterCore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = self.read_info();
        f.debug_struct("AdapterCore")
            .field("name", &info.name)
            .field("backend", &info.backend)
            .field("status", &info.status)
            .finish_non_exhaustive()
    }
}
