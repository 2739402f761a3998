//! Resource groups on the retail ERP.
//!
//! Regions are absent on this backend and stay on the framework's
//! unsupported placeholder. A few domain operations the ERP has no
//! endpoint for (user invites, per-region tax rates) keep their
//! `NotSupported` defaults.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

use tradelink_connector::adapter::AdapterCore;
use tradelink_connector::api::{
    CustomersApi, InventoryApi, OrdersApi, ProductsApi, SalesChannelsApi, TaxesApi, UsersApi,
    VariantsApi, WarehousesApi,
};
use tradelink_connector::error::AdapterResult;
use tradelink_connector::options::{BulkOutcome, ListOptions};
use tradelink_connector::types::{BackendType, ResourceType};

use crate::client::ErpClient;
use crate::query::{list_query, record_id, unwrap_collection, unwrap_record};

/// Generates one group struct and its trait impl: the five CRUD methods
/// all delegate to `ErpClient`, followed by the group's own operations.
macro_rules! erp_api {
    ($name:ident, $resource:expr, $trait:ident, { $($extra:tt)* }) => {
        pub(crate) struct $name {
            client: ErpClient,
        }

        impl $name {
            pub(crate) fn new(core: Arc<AdapterCore>) -> Self {
                Self {
                    client: ErpClient::new(core, $resource),
                }
            }
        }

        #[async_trait]
        impl $trait for $name {
            fn backend(&self) -> BackendType {
                BackendType::RegionalErp
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

            $($extra)*
        }
    };
}

erp_api!(ErpProducts, ResourceType::Products, ProductsApi, {
    async fn bulk_create(&self, items: Vec<Value>) -> AdapterResult<Vec<BulkOutcome>> {
        let mut outcomes = Vec::with_capacity(items.len());
        for (index, item) in items.into_iter().enumerate() {
            match self.client.create(item).await {
                Ok(record) => {
                    outcomes.push(BulkOutcome::ok(index, record_id(&record).unwrap_or_default()));
                }
                Err(err) => outcomes.push(BulkOutcome::failed(index, err.to_string())),
            }
        }
        Ok(outcomes)
    }

    async fn bulk_update(&self, items: Vec<(String, Value)>) -> AdapterResult<Vec<BulkOutcome>> {
        let mut outcomes = Vec::with_capacity(items.len());
        for (index, (id, data)) in items.into_iter().enumerate() {
            match self.client.update(&id, data).await {
                Ok(_) => outcomes.push(BulkOutcome::ok(index, id)),
                Err(err) => outcomes.push(BulkOutcome::failed(index, err.to_string())),
            }
        }
        Ok(outcomes)
    }
});

erp_api!(ErpVariants, ResourceType::Variants, VariantsApi, {
    async fn list_by_product(
        &self,
        product_id: &str,
        options: &ListOptions,
    ) -> AdapterResult<Vec<Value>> {
        let path = format!("/api/products/{product_id}/variants");
        let body = self
            .client
            .core()
            .get(&path, &list_query(options))
            .await?;
        unwrap_collection(body)
    }

    async fn update_prices(&self, id: &str, prices: Value) -> AdapterResult<Value> {
        let path = format!("{}/prices", self.client.item_path(id));
        let body = self.client.core().put(&path, &prices).await?;
        unwrap_record(body)
    }
});

erp_api!(ErpTaxes, ResourceType::Taxes, TaxesApi, {
    async fn calculate(&self, data: Value) -> AdapterResult<Value> {
        let body = self
            .client
            .core()
            .post("/api/taxes/calculate", &data)
            .await?;
        unwrap_record(body)
    }
});

erp_api!(ErpUsers, ResourceType::Users, UsersApi, {
    async fn set_role(&self, id: &str, role: &str) -> AdapterResult<Value> {
        self.client.update(id, json!({"role": role})).await
    }
});

erp_api!(ErpCustomers, ResourceType::Customers, CustomersApi, {
    async fn find_by_email(&self, email: &str) -> AdapterResult<Option<Value>> {
        // The ERP has no dedicated email filter, only free-text search; the
        // match is confirmed on the record itself.
        let options = ListOptions::new().with_limit(10).with_search(email);
        let matches = self.client.list(&options).await?;
        Ok(matches
            .into_iter()
            .find(|record| record.get("email").and_then(Value::as_str) == Some(email)))
    }

    async fn orders_for(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        self.client.sub_collection(id, "orders", options).await
    }
});

erp_api!(ErpOrders, ResourceType::Orders, OrdersApi, {
    async fn update_status(&self, id: &str, status: &str) -> AdapterResult<Value> {
        self.client
            .sub_post(id, "status", &json!({"status": status}))
            .await
    }

    async fn add_payment(&self, id: &str, payment: Value) -> AdapterResult<Value> {
        self.client.sub_post(id, "payments", &payment).await
    }

    async fn refund(&self, id: &str, refund: Value) -> AdapterResult<Value> {
        self.client.sub_post(id, "refunds", &refund).await
    }

    async fn invoice(&self, id: &str) -> AdapterResult<Value> {
        let path = format!("{}/invoice", self.client.item_path(id));
        let body = self.client.core().get(&path, &[]).await?;
        unwrap_record(body)
    }
});

erp_api!(ErpSalesChannels, ResourceType::SalesChannels, SalesChannelsApi, {
    async fn add_products(&self, id: &str, product_ids: Vec<String>) -> AdapterResult<Value> {
        self.client
            .sub_post(id, "products", &json!({"product_ids": product_ids}))
            .await
    }

    async fn remove_products(&self, id: &str, product_ids: Vec<String>) -> AdapterResult<Value> {
        self.client
            .sub_post(id, "products/remove", &json!({"product_ids": product_ids}))
            .await
    }

    async fn list_products(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        self.client.sub_collection(id, "products", options).await
    }
});

erp_api!(ErpInventory, ResourceType::Inventory, InventoryApi, {
    async fn update_quantity(&self, id: &str, quantity: i64) -> AdapterResult<Value> {
        self.client.update(id, json!({"quantity": quantity})).await
    }

    async fn stock(&self, id: &str) -> AdapterResult<Value> {
        let path = format!("{}/stock", self.client.item_path(id));
        let body = self.client.core().get(&path, &[]).await?;
        unwrap_record(body)
    }

    async fn adjust(&self, adjustments: Vec<Value>) -> AdapterResult<Vec<BulkOutcome>> {
        let mut outcomes = Vec::with_capacity(adjustments.len());
        for (index, adjustment) in adjustments.into_iter().enumerate() {
            let Some(id) = record_id(&adjustment) else {
                outcomes.push(BulkOutcome::failed(index, "adjustment is missing 'id'"));
                continue;
            };
            match self.client.sub_post(&id, "adjustments", &adjustment).await {
                Ok(_) => outcomes.push(BulkOutcome::ok(index, id)),
                Err(err) => outcomes.push(BulkOutcome::failed(index, err.to_string())),
            }
        }
        Ok(outcomes)
    }

    async fn movements(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        self.client.sub_collection(id, "movements", options).await
    }
});

erp_api!(ErpWarehouses, ResourceType::Warehouses, WarehousesApi, {
    async fn stock_levels(&self, id: &str, options: &ListOptions) -> AdapterResult<Vec<Value>> {
        self.client.sub_collection(id, "stock", options).await
    }

    async fn set_default(&self, id: &str) -> AdapterResult<Value> {
        self.client.sub_post(id, "default", &json!({})).await
    }
});
