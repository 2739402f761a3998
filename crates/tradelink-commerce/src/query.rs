//! Query translation for the commerce admin API.
//!
//! The commerce backend paginates with zero-based `offset`/`limit` query
//! parameters and wraps every response in a keyed envelope: collections as
//! `{"products": [...], "count": n}` and single records as
//! `{"product": {...}}`.

use serde_json::Value;

use tradelink_connector::error::{AdapterError, AdapterResult};
use tradelink_connector::options::{ListOptions, SortOrder};
use tradelink_connector::types::ResourceType;

/// URL path segment under `/admin` for one resource group.
pub(crate) fn collection_path(resource: ResourceType) -> &'static str {
    match resource {
        ResourceType::Products => "products",
        ResourceType::Variants => "variants",
        ResourceType::Regions => "regions",
        ResourceType::Taxes => "tax-rates",
        ResourceType::Users => "users",
        ResourceType::Customers => "customers",
        ResourceType::Orders => "orders",
        ResourceType::SalesChannels => "sales-channels",
        ResourceType::Inventory => "inventory-items",
        ResourceType::Warehouses => "stock-locations",
    }
}

/// Envelope key under which the backend returns a collection.
pub(crate) fn collection_key(resource: ResourceType) -> &'static str {
    match resource {
        ResourceType::Products => "products",
        ResourceType::Variants => "variants",
        ResourceType::Regions => "regions",
        ResourceType::Taxes => "tax_rates",
        ResourceType::Users => "users",
        ResourceType::Customers => "customers",
        ResourceType::Orders => "orders",
        ResourceType::SalesChannels => "sales_channels",
        ResourceType::Inventory => "inventory_items",
        ResourceType::Warehouses => "stock_locations",
    }
}

/// Envelope key under which the backend returns a single record.
pub(crate) fn record_key(resource: ResourceType) -> &'static str {
    match resource {
        ResourceType::Products => "product",
        ResourceType::Variants => "variant",
        ResourceType::Regions => "region",
        ResourceType::Taxes => "tax_rate",
        ResourceType::Users => "user",
        ResourceType::Customers => "customer",
        ResourceType::Orders => "order",
        ResourceType::SalesChannels => "sales_channel",
        ResourceType::Inventory => "inventory_item",
        ResourceType::Warehouses => "stock_location",
    }
}

/// Translate uniform list options into the backend's query parameters.
///
/// Page 1 with limit N becomes `offset=0&limit=N`, so the caller's first
/// page is always the backend's first N records.
pub(crate) fn list_query(options: &ListOptions) -> Vec<(String, String)> {
    let mut query = vec![
        ("limit".to_string(), options.limit().to_string()),
        ("offset".to_string(), options.offset().to_string()),
    ];

    if let Some(ref field) = options.sort_by {
        // Descending sorts use the backend's leading-dash convention.
        let prefix = match options.sort_order.unwrap_or_default() {
            SortOrder::Asc => "",
            SortOrder::Desc => "-",
        };
        query.push(("order".to_string(), format!("{prefix}{field}")));
    }
    if let Some(ref term) = options.search {
        query.push(("q".to_string(), term.clone()));
    }
    for (key, value) in &options.filters {
        query.push((key.clone(), value.clone()));
    }

    query
}

/// Pull the records out of a collection envelope.
pub(crate) fn unwrap_collection(body: Value, key: &str) -> AdapterResult<Vec<Value>> {
    body.get(key)
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| {
            AdapterError::invalid_response(format!("expected collection under '{key}'"))
        })
}

/// Pull the record out of a single-record envelope.
pub(crate) fn unwrap_record(body: Value, key: &str) -> AdapterResult<Value> {
    body.get(key)
        .cloned()
        .filter(|v| !v.is_null())
        .ok_or_else(|| AdapterError::invalid_response(format!("expected record under '{key}'")))
}

/// Identifier of a record, for bulk outcome reporting.
pub(crate) fn record_id(record: &Value) -> Option<String> {
    record
        .get("id")
        .and_then(Value::as_str)
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_first_page_maps_to_offset_zero() {
        let options = ListOptions::new().with_page(1).with_limit(5);
        let query = list_query(&options);
        assert!(query.contains(&("limit".to_string(), "5".to_string())));
        assert!(query.contains(&("offset".to_string(), "0".to_string())));
    }

    #[test]
    fn test_later_page_offset() {
        let options = ListOptions::new().with_page(3).with_limit(10);
        let query = list_query(&options);
        assert!(query.contains(&("offset".to_string(), "20".to_string())));
    }

    #[test]
    fn test_descending_sort_uses_dash_prefix() {
        let options = ListOptions::new().with_sort("created_at", SortOrder::Desc);
        let query = list_query(&options);
        assert!(query.contains(&("order".to_string(), "-created_at".to_string())));
    }

    #[test]
    fn test_unwrap_collection() {
        let body = json!({"products": [{"id": "prod_1"}], "count": 1});
        let records = unwrap_collection(body, "products").unwrap();
        assert_eq!(records.len(), 1);

        let err = unwrap_collection(json!({"count": 0}), "products").unwrap_err();
        assert!(matches!(
            err,
            AdapterError::InvalidResponse { .. }
        ));
    }

    #[test]
    fn test_unwrap_record() {
        let body = json!({"product": {"id": "prod_1"}});
        let record = unwrap_record(body, "product").unwrap();
        assert_eq!(record["id"], "prod_1");

        assert!(unwrap_record(json!({"product": null}), "product").is_err());
    }
}
