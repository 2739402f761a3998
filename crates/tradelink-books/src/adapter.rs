//! Cloud accounting adapter.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use tradelink_connector::adapter::{AdapterCore, BackofficeAdapter};
use tradelink_connector::api::{
    CustomersApi, InventoryApi, OrdersApi, ProductsApi, RegionsApi, SalesChannelsApi, TaxesApi,
    Unsupported, UsersApi, VariantsApi, WarehousesApi,
};
use tradelink_connector::auth::{AuthStrategy, ClientCredentialsAuth};
use tradelink_connector::config::{AuthConfig, ConnectionConfig};
use tradelink_connector::error::{AdapterError, AdapterResult};
use tradelink_connector::executor::RequestExecutor;
use tradelink_connector::options::{ConnectionTest, SyncOptions, SyncReport};
use tradelink_connector::types::{BackendType, ResourceType, SystemInfo};
use tracing::{info, instrument, warn};

use crate::catalog::{BooksProducts, BooksVariants};
use crate::contacts::{BooksCustomers, BooksUsers};
use crate::ledger::{BooksInventory, BooksOrders, BooksRegions, BooksTaxes};

const ADAPTER_NAME: &str = "Cloud Accounting";
const PROBE_PATH: &str = "/api/v1/organization";

/// Adapter for the cloud accounting platform.
///
/// Authenticates with the OAuth2 client-credentials flow scoped to one
/// tenant via the `X-Tenant-Id` header. The first token fetch doubles as
/// the connect handshake: invalid client credentials surface immediately
/// as a failed connect rather than on the first resource call. Orders map
/// onto sales invoices; sales channels and warehouses do not exist here.
pub struct BooksAdapter {
    core: Arc<AdapterCore>,
    products: BooksProducts,
    variants: BooksVariants,
    regions: BooksRegions,
    taxes: BooksTaxes,
    users: BooksUsers,
    customers: BooksCustomers,
    orders: BooksOrders,
    inventory: BooksInventory,
    unsupported: Unsupported,
}

impl BooksAdapter {
    pub fn new() -> Self {
        let capabilities = ResourceType::all()
            .iter()
            .copied()
            .filter(|r| !matches!(r, ResourceType::SalesChannels | ResourceType::Warehouses))
            .collect();
        let core = Arc::new(AdapterCore::new(
            ADAPTER_NAME,
            BackendType::Accounting,
            capabilities,
        ));
        Self {
            products: BooksProducts::new(Arc::clone(&core)),
            variants: BooksVariants::new(Arc::clone(&core)),
            regions: BooksRegions::new(Arc::clone(&core)),
            taxes: BooksTaxes::new(Arc::clone(&core)),
            users: BooksUsers::new(Arc::clone(&core)),
            customers: BooksCustomers::new(Arc::clone(&core)),
            orders: BooksOrders::new(Arc::clone(&core)),
            inventory: BooksInventory::new(Arc::clone(&core)),
            unsupported: Unsupported::new(BackendType::Accounting),
            core,
        }
    }

    fn build_auth(config: &ConnectionConfig) -> AdapterResult<Arc<ClientCredentialsAuth>> {
        let AuthConfig::OAuth2 {
            ref token_url,
            ref client_id,
            ref client_secret,
            ref scope,
        } = config.auth
        else {
            return Err(AdapterError::invalid_config(
                "the accounting platform authenticates with OAuth2 client credentials",
            ));
        };
        Ok(Arc::new(ClientCredentialsAuth::new(
            token_url.clone(),
            client_id.clone(),
            client_secret.clone(),
            scope.clone(),
            reqwest::Client::new(),
        )))
    }

    fn build_executor(
        config: &ConnectionConfig,
        auth: Arc<ClientCredentialsAuth>,
    ) -> AdapterResult<RequestExecutor> {
        let Some(ref tenant_id) = config.tenant_id else {
            return Err(AdapterError::invalid_config(
                "the accounting platform requires a tenant id",
            ));
        };
        let extra = vec![("X-Tenant-Id".to_string(), tenant_id.clone())];
        let auth: Arc<dyn AuthStrategy> = auth;
        RequestExecutor::new(&config.base_url, auth, extra, config.timeout_secs)
    }
}

impl Default for BooksAdapter {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackofficeAdapter for BooksAdapter {
    fn backend_type(&self) -> BackendType {
        BackendType::Accounting
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
        let auth = Self::build_auth(&config)?;
        let executor = Arc::new(Self::build_executor(&config, Arc::clone(&auth))?);
        self.core.set_connecting(config);

        let started = Instant::now();

        // The token fetch is the first half of the handshake; bad client
        // credentials fail here, before any resource endpoint is touched.
        if let Err(err) = auth.get_token().await {
            warn!(error = %err, "token handshake rejected");
            self.core.set_error();
            return Ok(false);
        }

        match executor.get(PROBE_PATH, &[]).await {
            Ok(body) => {
                let elapsed_ms = started.elapsed().as_millis() as u64;
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
        // Drop the cached token so a later reconnect starts clean.
        if let Ok(executor) = self.core.executor() {
            executor.auth().invalidate().await;
        }
        self.core.set_disconnected();
        Ok(true)
    }

    async fn test_connection(&self) -> ConnectionTest {
        let executor = match self.core.executor() {
            Ok(executor) => executor,
            Err(_) => {
                let Some(config) = self.core.config() else {
                    return ConnectionTest::failed(0, "no connection configured");
                };
                match Self::build_auth(&config)
                    .and_then(|auth| Self::build_executor(&config, auth))
                {
                    Ok(executor) => Arc::new(executor),
                    Err(err) => return ConnectionTest::failed(0, err.to_string()),
                }
            }
        };

        let started = Instant::now();
        let result = executor.get(PROBE_PATH, &[]).await;
        let elapsed_ms = started.elapsed().as_millis() as u64;
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
        &self.unsupported
    }
    fn inventory(&self) -> &dyn InventoryApi {
        &self.inventory
    }
    fn warehouses(&self) -> &dyn WarehousesApi {
        &self.unsupported
    }

    async fn sync(&self, options: SyncOptions) -> AdapterResult<SyncReport> {
        self.core.run_sync(self, options).await
    }

    fn sync_status(&self) -> Option<SyncReport> {
        self.core.last_report()
    }
}
