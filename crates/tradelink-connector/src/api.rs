//! Resource API traits
//!
//! Ten uniform capability groups, one trait each. Every operation defaults
//! to a `NotSupported` failure so a backend that structurally lacks a
//! concept satisfies the group observably, never as a silent empty success.
//! Concrete adapters override the operations their backend actually has.
//!
//! Payloads stay backend-shaped (`serde_json::Value`): only the operations
//! are unified across backends, not the data model.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{AdapterError, AdapterResult};
use crate::options::{BulkOutcome, ListOptions};
use crate::types::BackendType;

macro_rules! unsupported {
    ($self:expr, $op:expr) => {
        Err(AdapterError::not_supported($self.backend(), $op))
    };
}

/// Product catalog entries.
#[async_trait]
pub trait ProductsApi: Send + Sync {
    /// The backend this implementation talks to.
    fn backend(&self) -> BackendType;

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = options;
        unsupported!(self, "products.list")
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        let _ = id;
        unsupported!(self, "products.get")
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        let _ = data;
        unsupported!(self, "products.create")
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        let _ = (id, data);
        unsupported!(self, "products.update")
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        let _ = id;
        unsupported!(self, "products.delete")
    }

    /// Create many products, one outcome per input item in input order.
    /// A single item's failure never prevents the others from being tried.
    async fn bulk_create(&self, items: Vec<Value>) -> AdapterResult<Vec<BulkOutcome>> {
        let _ = items;
        unsupported!(self, "products.bulk_create")
    }

    /// Update many products by id, one outcome per input item in input order.
    async fn bulk_update(&self, items: Vec<(String, Value)>) -> AdapterResult<Vec<BulkOutcome>> {
        let _ = items;
        unsupported!(self, "products.bulk_update")
    }
}

/// Product variants.
#[async_trait]
pub trait VariantsApi: Send + Sync {
    fn backend(&self) -> BackendType;

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = options;
        unsupported!(self, "variants.list")
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        let _ = id;
        unsupported!(self, "variants.get")
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        let _ = data;
        unsupported!(self, "variants.create")
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        let _ = (id, data);
        unsupported!(self, "variants.update")
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        let _ = id;
        unsupported!(self, "variants.delete")
    }

    /// Variants belonging to one product.
    async fn list_by_product(
        &self,
        product_id: &str,
        options: &ListOptions,
    ) -> AdapterResult<Vec<Value>> {
        let _ = (product_id, options);
        unsupported!(self, "variants.list_by_product")
    }

    /// Replace the price set of one variant.
    async fn update_prices(&self, id: &str, prices: Value) -> AdapterResult<Value> {
        let _ = (id, prices);
        unsupported!(self, "variants.update_prices")
    }
}

/// Sales regions / markets.
#[async_trait]
pub trait RegionsApi: Send + Sync {
    fn backend(&self) -> BackendType;

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = options;
        unsupported!(self, "regions.list")
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        let _ = id;
        unsupported!(self, "regions.get")
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        let _ = data;
        unsupported!(self, "regions.create")
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        let _ = (id, data);
        unsupported!(self, "regions.update")
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        let _ = id;
        unsupported!(self, "regions.delete")
    }

    /// The region serving a given ISO country code.
    async fn get_by_country(&self, country_code: &str) -> AdapterResult<Value> {
        let _ = country_code;
        unsupported!(self, "regions.get_by_country")
    }
}

/// Tax rates and calculation.
#[async_trait]
pub trait TaxesApi: Send + Sync {
    fn backend(&self) -> BackendType;

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = options;
        unsupported!(self, "taxes.list")
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        let _ = id;
        unsupported!(self, "taxes.get")
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        let _ = data;
        unsupported!(self, "taxes.create")
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        let _ = (id, data);
        unsupported!(self, "taxes.update")
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        let _ = id;
        unsupported!(self, "taxes.delete")
    }

    /// Tax rates applying in one region/jurisdiction.
    async fn rates_for_region(&self, region_id: &str) -> AdapterResult<Vec<Value>> {
        let _ = region_id;
        unsupported!(self, "taxes.rates_for_region")
    }

    /// Calculate tax for a draft document.
    async fn calculate(&self, data: Value) -> AdapterResult<Value> {
        let _ = data;
        unsupported!(self, "taxes.calculate")
    }
}

/// Back-office user accounts.
#[async_trait]
pub trait UsersApi: Send + Sync {
    fn backend(&self) -> BackendType;

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = options;
        unsupported!(self, "users.list")
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        let _ = id;
        unsupported!(self, "users.get")
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        let _ = data;
        unsupported!(self, "users.create")
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        let _ = (id, data);
        unsupported!(self, "users.update")
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        let _ = id;
        unsupported!(self, "users.delete")
    }

    /// Send an invitation for a new user.
    async fn invite(&self, data: Value) -> AdapterResult<Value> {
        let _ = data;
        unsupported!(self, "users.invite")
    }

    /// Change a user's role.
    async fn set_role(&self, id: &str, role: &str) -> AdapterResult<Value> {
        let _ = (id, role);
        unsupported!(self, "users.set_role")
    }
}

/// Customer records.
#[async_trait]
pub trait CustomersApi: Send + Sync {
    fn backend(&self) -> BackendType;

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = options;
        unsupported!(self, "customers.list")
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        let _ = id;
        unsupported!(self, "customers.get")
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        let _ = data;
        unsupported!(self, "customers.create")
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        let _ = (id, data);
        unsupported!(self, "customers.update")
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        let _ = id;
        unsupported!(self, "customers.delete")
    }

    /// Look up a customer by email address.
    async fn find_by_email(&self, email: &str) -> AdapterResult<Option<Value>> {
        let _ = email;
        unsupported!(self, "customers.find_by_email")
    }

    /// Orders placed by one customer.
    async fn orders_for(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = (id, options);
        unsupported!(self, "customers.orders_for")
    }
}

/// Orders (or their backend equivalent, e.g. sales invoices).
#[async_trait]
pub trait OrdersApi: Send + Sync {
    fn backend(&self) -> BackendType;

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = options;
        unsupported!(self, "orders.list")
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        let _ = id;
        unsupported!(self, "orders.get")
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        let _ = data;
        unsupported!(self, "orders.create")
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        let _ = (id, data);
        unsupported!(self, "orders.update")
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        let _ = id;
        unsupported!(self, "orders.delete")
    }

    /// Move an order to a new status.
    async fn update_status(&self, id: &str, status: &str) -> AdapterResult<Value> {
        let _ = (id, status);
        unsupported!(self, "orders.update_status")
    }

    /// Register a payment against an order.
    async fn add_payment(&self, id: &str, payment: Value) -> AdapterResult<Value> {
        let _ = (id, payment);
        unsupported!(self, "orders.add_payment")
    }

    /// Refund part or all of an order.
    async fn refund(&self, id: &str, refund: Value) -> AdapterResult<Value> {
        let _ = (id, refund);
        unsupported!(self, "orders.refund")
    }

    /// The invoice document for an order.
    async fn invoice(&self, id: &str) -> AdapterResult<Value> {
        let _ = id;
        unsupported!(self, "orders.invoice")
    }
}

/// Sales channels.
#[async_trait]
pub trait SalesChannelsApi: Send + Sync {
    fn backend(&self) -> BackendType;

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = options;
        unsupported!(self, "sales_channels.list")
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        let _ = id;
        unsupported!(self, "sales_channels.get")
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        let _ = data;
        unsupported!(self, "sales_channels.create")
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        let _ = (id, data);
        unsupported!(self, "sales_channels.update")
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        let _ = id;
        unsupported!(self, "sales_channels.delete")
    }

    /// Attach products to a channel.
    async fn add_products(&self, id: &str, product_ids: Vec<String>) -> AdapterResult<Value> {
        let _ = (id, product_ids);
        unsupported!(self, "sales_channels.add_products")
    }

    /// Detach products from a channel.
    async fn remove_products(&self, id: &str, product_ids: Vec<String>) -> AdapterResult<Value> {
        let _ = (id, product_ids);
        unsupported!(self, "sales_channels.remove_products")
    }

    /// Products visible in a channel.
    async fn list_products(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = (id, options);
        unsupported!(self, "sales_channels.list_products")
    }
}

/// Inventory levels and movements.
#[async_trait]
pub trait InventoryApi: Send + Sync {
    fn backend(&self) -> BackendType;

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = options;
        unsupported!(self, "inventory.list")
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        let _ = id;
        unsupported!(self, "inventory.get")
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        let _ = data;
        unsupported!(self, "inventory.create")
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        let _ = (id, data);
        unsupported!(self, "inventory.update")
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        let _ = id;
        unsupported!(self, "inventory.delete")
    }

    /// Set the absolute on-hand quantity of one item.
    async fn update_quantity(&self, id: &str, quantity: i64) -> AdapterResult<Value> {
        let _ = (id, quantity);
        unsupported!(self, "inventory.update_quantity")
    }

    /// Current stock of one item.
    async fn stock(&self, id: &str) -> AdapterResult<Value> {
        let _ = id;
        unsupported!(self, "inventory.stock")
    }

    /// Apply relative adjustments, one outcome per input item in input order.
    async fn adjust(&self, adjustments: Vec<Value>) -> AdapterResult<Vec<BulkOutcome>> {
        let _ = adjustments;
        unsupported!(self, "inventory.adjust")
    }

    /// Stock movement history of one item.
    async fn movements(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = (id, options);
        unsupported!(self, "inventory.movements")
    }
}

/// Warehouses / stock locations.
#[async_trait]
pub trait WarehousesApi: Send + Sync {
    fn backend(&self) -> BackendType;

    async fn list(&self, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = options;
        unsupported!(self, "warehouses.list")
    }

    async fn get(&self, id: &str) -> AdapterResult<Value> {
        let _ = id;
        unsupported!(self, "warehouses.get")
    }

    async fn create(&self, data: Value) -> AdapterResult<Value> {
        let _ = data;
        unsupported!(self, "warehouses.create")
    }

    async fn update(&self, id: &str, data: Value) -> AdapterResult<Value> {
        let _ = (id, data);
        unsupported!(self, "warehouses.update")
    }

    async fn delete(&self, id: &str) -> AdapterResult<()> {
        let _ = id;
        unsupported!(self, "warehouses.delete")
    }

    /// Stock levels held at one warehouse.
    async fn stock_levels(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        let _ = (id, options);
        unsupported!(self, "warehouses.stock_levels")
    }

    /// Mark one warehouse as the default fulfillment location.
    async fn set_default(&self, id: &str) -> AdapterResult<Value> {
        let _ = id;
        unsupported!(self, "warehouses.set_default")
    }
}

/// Placeholder implementation for resource groups a backend does not have.
///
/// Implements every group trait through the defaults alone, so each call
/// fails with `NotSupported` immediately.
pub struct Unsupported {
    backend: BackendType,
}

impl Unsupported {
    pub fn new(backend: BackendType) -> Self {
        Self { backend }
    }
}

macro_rules! impl_unsupported {
    ($($api:ident),+ $(,)?) => {
        $(
            #[async_trait]
            impl $api for Unsupported {
                fn backend(&self) -> BackendType {
                    self.backend
                }
            }
        )+
    };
}

impl_unsupported!(
    ProductsApi,
    VariantsApi,
    RegionsApi,
    TaxesApi,
    UsersApi,
    CustomersApi,
    OrdersApi,
    SalesChannelsApi,
    InventoryApi,
    WarehousesApi,
);
