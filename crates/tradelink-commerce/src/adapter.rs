//! Commerce back-office adapter.

use async_trait::async_trait;
use reqwest::Method;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Instant;

use tradelink_connector::adapter::{AdapterCore, BackofficeAdapter};
use tradelink_connector::api::{
    CustomersApi, InventoryApi, OrdersApi, ProductsApi, RegionsApi, SalesChannelsApi, TaxesApi,
    UsersApi, VariantsApi, WarehousesApi,
};
use tradelink_connector::auth::ApiKeyAuth;
use tradelink_connector::config::{AuthConfig, ConnectionConfig};
use tradelink_connector::error::{AdapterError, AdapterResult};
use tradelink_connector::executor::RequestExecutor;
use tradelink_connector::options::{
    BulkOutcome, ConnectionTest, ListOptions, SyncOptions, SyncReport,
};
use tradelink_connector::types::{BackendType, ResourceType, SystemInfo};
use tracing::{info, instrument, warn};

use crate::catalog::{CommerceProducts, CommerceVariants};
use crate::client::ResourceClient;
use crate::inventory::{CommerceInventory, CommerceWarehouses};
use crate::orders::{CommerceCustomers, CommerceOrders};
use crate::query::record_id;
use crate::settings::{CommerceRegions, CommerceSalesChannels, CommerceTaxes, CommerceUsers};

const ADAPTER_NAME: &str = "Commerce Back-Office";
const PROBE_PATH: &str = "/admin/system";

/// Adapter for the commerce back-office admin API.
///
/// Authenticates with a static API key, paginates with `offset`/`limit`,
/// and implements all ten resource groups plus the optional platform
/// operations (webhooks, bulk import/export, raw requests).
pub struct CommerceAdapter {
    core: Arc<AdapterCore>,
    products: CommerceProducts,
    variants: CommerceVariants,
    regions: CommerceRegions,
    taxes: CommerceTaxes,
    users: CommerceUsers,
    customers: CommerceCustomers,
    orders: CommerceOrders,
    sales_channels: CommerceSalesChannels,
    inventory: CommerceInventory,
    warehouses: CommerceWarehouses,
}

impl CommerceAdapter {
    pub fn new() -> Self {
        let core = Arc::new(AdapterCore::new(
            ADAPTER_NAME,
            BackendType::Commerce,
            ResourceType::all().to_vec(),
        ));
        Self {
            products: CommerceProducts::new(Arc::clone(&core)),
            variants: CommerceVariants::new(Arc::clone(&core)),
            regions: CommerceRegions::new(Arc::clone(&core)),
            taxes: CommerceTaxes::new(Arc::clone(&core)),
            users: CommerceUsers::new(Arc::clone(&core)),
            customers: CommerceCustomers::new(Arc::clone(&core)),
            orders: CommerceOrders::new(Arc::clone(&core)),
            sales_channels: CommerceSalesChannels::new(Arc::clone(&core)),
            inventory: CommerceInventory::new(Arc::clone(&core)),
            warehouses: CommerceWarehouses::new(Arc::clone(&core)),
            core,
        }
    }

    fn build_executor(config: &ConnectionConfig) -> AdapterResult<RequestExecutor> {
        let AuthConfig::ApiKey {
            ref key,
            ref header_name,
        } = config.auth
        else {
            return Err(AdapterError::invalid_config(
                "the commerce backend authenticates with an API key",
            ));
        };
        let auth = Arc::new(ApiKeyAuth::new(header_name.clone(), key.clone()));
        RequestExecutor::new(&config.base_url, auth, Vec::new(), config.timeout_secs)
    }

    async fn probe(executor: &RequestExecutor) -> (u64, AdapterResult<Value>) {
        let started = Instant::now();
        let result = executor.get(PROBE_PATH, &[]).await;
        (started.elapsed().as_millis() as u64, result)
    }
}

impl Default for CommerceAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackofficeAdapter for CommerceAdapter {
    fn backend_type(&self) -> BackendType {
        BackendType::Commerce
    }

    fn system_info(&self) -> SystemInfo {
        self.core.system_info()
    }

    fn is_connected(&self) -> bool {
        self.core.is_connected()
    }

    #[instrument(skip_all, fields(base_url = %config.base_url))]
    async fn connect(&self, config: ConnectionConfig) -> AdapterResult<bool> {
        config.validate()?;
        let executor = Arc::new(Self::build_executor(&config)?);
        self.core.set_connecting(config);

        let (elapsed_ms, result) = Self::probe(&executor).await;
        match result {
            Ok(body) => {
                let version = body
                    .get("version")
                    .and_then(Value::as_str)
                    .unwrap_or("unknown")
                    .to_string();
                info!(version = %version, elapsed_ms, "connected");
                self.core.set_connected(executor, version, elapsed_ms);
                Ok(true)
            }
            Err(err) => {
                warn!(error = %err, "handshake rejected");
                self.core.set_error();
                Ok(false)
            }
        }
    }

    async fn disconnect(&self) -> AdapterResult<bool> {
        if let Ok(executor) = self.core.executor() {
            executor.auth().invalidate().await;
        }
        self.core.set_disconnected();
        Ok(true)
    }

    async fn test_connection(&self) -> ConnectionTest {
        let executor = match self.core.executor() {
            Ok(executor) => executor,
            Err(_) => match self.core.config().map(|c| Self::build_executor(&c)) {
                Some(Ok(executor)) => Arc::new(executor),
                Some(Err(err)) => return ConnectionTest::failed(0, err.to_string()),
                None => return ConnectionTest::failed(0, "no connection configured"),
            },
        };

        let (elapsed_ms, result) = Self::probe(&executor).await;
        match result {
            Ok(_) => ConnectionTest::ok(elapsed_ms, "backend reachable"),
            Err(err) => ConnectionTest::failed(elapsed_ms, err.to_string()),
        }
    }

    fn products(&self) -> &dyn ProductsApi {
        &self.products
    }
    fn variants(&self) -> &dyn VariantsApi {
        &self.variants
    }
    fn regions(&self) -> &dyn RegionsApi {
        &self.regions
    }
    fn taxes(&self) -> &dyn TaxesApi {
        &self.taxes
    }
    fn users(&self) -> &dyn UsersApi {
        &self.users
    }
    fn customers(&self) -> &dyn CustomersApi {
        &self.customers
    }
    fn orders(&self) -> &dyn OrdersApi {
        &self.orders
    }
    fn sales_channels(&self) -> &dyn SalesChannelsApi {
        &self.sales_channels
    }
    fn inventory(&self) -> &dyn InventoryApi {
        &self.inventory
    }
    fn warehouses(&self) -> &dyn WarehousesApi {
        &self.warehouses
    }

    async fn sync(&self, options: SyncOptions) -> AdapterResult<SyncReport> {
        self.core.run_sync(self, options).await
    }

    fn sync_status(&self) -> Option<SyncReport> {
        self.core.last_report()
    }

    async fn setup_webhooks(&self, config: Value) -> AdapterResult<Value> {
        self.core.post("/admin/webhooks", &config).await
    }

    async fn handle_webhook(&self, payload: Value) -> AdapterResult<Value> {
        let event = payload
            .get("event")
            .and_then(Value::as_str)
            .ok_or_else(|| AdapterError::invalid_response("webhook payload has no 'event'"))?
            .to_string();
        let data = payload.get("data").cloned().unwrap_or(Value::Null);
        Ok(json!({
            "event": event,
            "id": data.get("id").cloned().unwrap_or(Value::Null),
            "data": data,
        }))
    }

    async fn bulk_import(
        &self,
        resource: ResourceType,
        items: Vec<Value>,
    ) -> AdapterResult<Vec<BulkOutcome>> {
        let client = ResourceClient::new(Arc::clone(&self.core), resource);
        let mut outcomes = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match client.create(item).await {
                Ok(record) => {
                    outcomes.push(BulkOutcome::ok(index, record_id(&record).unwrap_or_default()));
                }
                Err(err) => outcomes.push(BulkOutcome::failed(index, err.to_string())),
            }
        }
        Ok(outcomes)
    }

    async fn bulk_export(
        &self,
        resource: ResourceType,
        options: &ListOptions,
    ) -> AdapterResult<Vec<Value>> {
        self.list_resource(resource, options).await
    }

    async fn custom_request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
    ) -> AdapterResult<Value> {
        let method: Method = method
            .parse()
            .map_err(|_| AdapterError::invalid_config(format!("invalid HTTP method '{method}'")))?;
        self.core
            .request(method, path, &[], body.as_ref())
            .await
    }
}
