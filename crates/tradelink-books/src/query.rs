//! Query translation for the accounting platform's OData-style API.
//!
//! Collections arrive under a `value` key; single records arrive bare.
//! Pagination is `$top`/`$skip`, sorting is `$orderby`, and filters are
//! folded into one `$filter` conjunction of `eq` clauses.

use serde_json::Value;

use tradelink_connector::error::{AdapterError, AdapterResult};
use tradelink_connector::options::{ListOptions, SortOrder};
use tradelink_connector::types::ResourceType;

/// URL path segment under `/api/v1` for one resource group.
///
/// The platform has no sales channels or warehouses; those groups never
/// reach this mapping.
pub(crate) fn collection_path(resource: ResourceType) -> &'static str {
    match resource {
        ResourceType::Products => "items",
        ResourceType::Variants => "itemvariants",
        ResourceType::Regions => "jurisdictions",
        ResourceType::Taxes => "taxrates",
        ResourceType::Users => "users",
        ResourceType::Customers => "contacts",
        // Orders surface as sales invoices on this backend.
        ResourceType::Orders => "invoices",
        ResourceType::Inventory => "stocklevels",
        ResourceType::SalesChannels => "saleschannels",
        ResourceType::Warehouses => "warehouses",
    }
}

/// Translate uniform list options into OData query parameters.
///
/// Page 1 with limit N becomes `$top=N&$skip=0`, the backend's first page.
pub(crate) fn list_query(options: &ListOptions) -> Vec<(String, String)> {
    let mut query = vec![
        ("$top".to_string(), options.limit().to_string()),
        ("$skip".to_string(), options.offset().to_string()),
    ];

    if let Some(ref field) = options.sort_by {
        let direction = match options.sort_order.unwrap_or_default() {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        };
        query.push(("$orderby".to_string(), format!("{field} {direction}")));
    }
    if let Some(ref term) = options.search {
        query.push(("$search".to_string(), term.clone()));
    }
    if !options.filters.is_empty() {
        query.push(("$filter".to_string(), filter_clause(options)));
    }

    query
}

/// Fold the uniform filters into one `$filter` conjunction.
fn filter_clause(options: &ListOptions) -> String {
    let mut clauses: Vec<String> = options
        .filters
        .iter()
        .map(|(key, value)| format!("{key} eq '{}'", value.replace('\'', "''")))
        .collect();
    // HashMap order is arbitrary; a stable clause keeps requests cacheable.
    clauses.sort();
    clauses.join(" and ")
}

/// Pull the records out of a `value` collection envelope.
pub(crate) fn unwrap_collection(body: Value) -> AdapterResult<Vec<Value>> {
    body.get("value")
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| AdapterError::invalid_response("expected collection under 'value'"))
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
    fn test_first_page_maps_to_top_and_skip() {
        let options = ListOptions::new().with_page(1).with_limit(5);
        let query = list_query(&options);
        assert!(query.contains(&("$top".to_string(), "5".to_string())));
        assert!(query.contains(&("$skip".to_string(), "0".to_string())));
    }

    #[test]
    fn test_second_page_skips_one_page() {
        let options = ListOptions::new().with_page(2).with_limit(10);
        let query = list_query(&options);
        assert!(query.contains(&("$skip".to_string(), "10".to_string())));
    }

    #[test]
    fn test_orderby_clause() {
        let options = ListOptions::new().with_sort("issuedAt", SortOrder::Desc);
        let query = list_query(&options);
        assert!(query.contains(&("$orderby".to_string(), "issuedAt desc".to_string())));
    }

    #[test]
    fn test_filters_fold_into_sorted_conjunction() {
        let options = ListOptions::new()
            .with_filter("status", "open")
            .with_filter("currency", "EUR");
        let query = list_query(&options);
        assert!(query.contains(&(
            "$filter".to_string(),
            "currency eq 'EUR' and status eq 'open'".to_string()
        )));
    }

    #[test]
    fn test_filter_escapes_quotes() {
        let options = ListOptions::new().with_filter("name", "O'Brien");
        let query = list_query(&options);
        assert!(query.contains(&("$filter".to_string(), "name eq 'O''Brien'".to_string())));
    }

    #[test]
    fn test_unwrap_collection() {
        let body = json!({"value": [{"id": "itm_1"}]});
        assert_eq!(unwrap_collection(body).unwrap().len(), 1);
        assert!(unwrap_collection(json!({"items": []})).is_err());
    }
}
