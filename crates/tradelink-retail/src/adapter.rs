//! Retail ERP adapter.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use tradelink_connector::adapter::{AdapterCore, BackofficeAdapter};
use tradelink_connector::api::{
    CustomersApi, InventoryApi, OrdersApi, ProductsApi, RegionsApi, SalesChannelsApi, TaxesApi,
    Unsupported, UsersApi, VariantsApi, WarehousesApi,
};
use tradelink_connector::auth::BasicAuth;
use tradelink_connector::config::{AuthConfig, ConnectionConfig};
use tradelink_connector::error::{AdapterError, AdapterResult};
use tradelink_connector::executor::RequestExecutor;
use tradelink_connector::options::{ConnectionTest, SyncOptions, SyncReport};
use tradelink_connector::types::{BackendType, ResourceType, SystemInfo};
use tracing::{info, instrument, warn};

use crate::resources::{
    ErpCustomers, ErpInventory, ErpOrders, ErpProducts, ErpSalesChannels, ErpTaxes, ErpUsers,
    ErpVariants, ErpWarehouses,
};

const ADAPTER_NAME: &str = "Regional Retail ERP";
const PROBE_PATH: &str = "/api/company";

/// Adapter for the regional retail ERP.
///
/// Authenticates with basic credentials scoped to one company via the
/// `X-Company-Id` header, paginates with one-indexed `page`/`per_page`,
/// and synthesizes the uniform `status` field from the ERP's `active`
/// boolean. The ERP has no concept of sales regions, so that group is
/// permanently unsupported.
pub struct RetailAdapter {
    core: Arc<AdapterCore>,
    products: ErpProducts,
    variants: ErpVariants,
    regions: Unsupported,
    taxes: ErpTaxes,
    users: ErpUsers,
    customers: ErpCustomers,
    orders: ErpOrders,
    sales_channels: ErpSalesChannels,
    inventory: ErpInventory,
    warehouses: ErpWarehouses,
}

impl RetailAdapter {
    pub fn new() -> Self {
        let capabilities = ResourceType::all()
            .iter()
            .copied()
            .filter(|r| *r != ResourceType::Regions)
            .collect();
        let core = Arc::new(AdapterCore::new(
            ADAPTER_NAME,
            BackendType::RegionalErp,
            capabilities,
        ));
        Self {
            products: ErpProducts::new(Arc::clone(&core)),
            variants: ErpVariants::new(Arc::clone(&core)),
            regions: Unsupported::new(BackendType::RegionalErp),
            taxes: ErpTaxes::new(Arc::clone(&core)),
            users: ErpUsers::new(Arc::clone(&core)),
            customers: ErpCustomers::new(Arc::clone(&core)),
            orders: ErpOrders::new(Arc::clone(&core)),
            sales_channels: ErpSalesChannels::new(Arc::clone(&core)),
            inventory: ErpInventory::new(Arc::clone(&core)),
            warehouses: ErpWarehouses::new(Arc::clone(&core)),
            core,
        }
    }

    fn build_executor(config: &ConnectionConfig) -> AdapterResult<RequestExecutor> {
        let AuthConfig::Basic {
            ref username,
            ref password,
        } = config.auth
        else {
            return Err(AdapterError::invalid_config(
                "the retail ERP authenticates with basic credentials",
            ));
        };
        let Some(ref company_id) = config.company_id else {
            return Err(AdapterError::invalid_config(
                "the retail ERP requires a company id",
            ));
        };

        let auth = Arc::new(BasicAuth::new(username, password));
        let extra = vec![("X-Company-Id".to_string(), company_id.clone())];
        RequestExecutor::new(&config.base_url, auth, extra, config.timeout_secs)
    }

    async fn probe(executor: &RequestExecutor) -> (u64, AdapterResult<Value>) {
        let started = Instant::now();
        let result = executor.get(PROBE_PATH, &[]).await;
        (started.elapsed().as_millis() as u64, result)
    }
}

impl Default for RetailAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackofficeAdapter for RetailAdapter {
    fn backend_type(&self) -> BackendType {
        BackendType::RegionalErp
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
                    .pointer("/data/version")
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
}
