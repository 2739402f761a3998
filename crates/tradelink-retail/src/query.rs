//! Query translation for the retail ERP API.
//!
//! The ERP paginates with one-indexed `page`/`per_page` parameters and
//! wraps responses in a `data` envelope, with collection totals under
//! `meta.total`. Records carry an `active` boolean instead of a status
//! string; the adapter synthesizes `status` on the way out and folds it
//! back into `active` on the way in, so callers see the same shape on
//! every backend.

use serde_json::{json, Value};

use tradelink_connector::error::{AdapterError, AdapterResult};
use tradelink_connector::options::ListOptions;
use tradelink_connector::types::ResourceType;

/// URL path segment under `/api` for one resource group.
pub(crate) fn collection_path(resource: ResourceType) -> &'static str {
    match resource {
        ResourceType::Products => "products",
        ResourceType::Variants => "variants",
        // No regions on this backend; the group stays unsupported.
        ResourceType::Regions => "regions",
        ResourceType::Taxes => "taxes",
        ResourceType::Users => "users",
        ResourceType::Customers => "customers",
        ResourceType::Orders => "orders",
        ResourceType::SalesChannels => "channels",
        ResourceType::Inventory => "inventory",
        ResourceType::Warehouses => "warehouses",
    }
}

/// Translate uniform list options into the ERP's query parameters.
///
/// The caller's one-indexed page maps straight onto the ERP's, so page 1
/// with limit N is the ERP's first page of N records.
pub(crate) fn list_query(options: &ListOptions) -> Vec<(String, String)> {
    let mut query = vec![
        ("page".to_string(), options.page().to_string()),
        ("per_page".to_string(), options.limit().to_string()),
    ];

    if let Some(ref field) = options.sort_by {
        query.push(("sort".to_string(), field.clone()));
        query.push((
            "direction".to_string(),
            options.sort_order.unwrap_or_default().as_str().to_string(),
        ));
    }
    if let Some(ref term) = options.search {
        query.push(("search".to_string(), term.clone()));
    }
    for (key, value) in &options.filters {
        query.push((key.clone(), value.clone()));
    }

    query
}

/// Pull the records out of a `data` collection envelope, synthesizing
/// `status` on each record.
pub(crate) fn unwrap_collection(body: Value) -> AdapterResult<Vec<Value>> {
    let records = body
        .get("data")
        .and_then(Value::as_array)
        .cloned()
        .ok_or_else(|| AdapterError::invalid_response("expected collection under 'data'"))?;
    Ok(records.into_iter().map(normalize_record).collect())
}

/// Pull a single record out of a `data` envelope, synthesizing `status`.
pub(crate) fn unwrap_record(body: Value) -> AdapterResult<Value> {
    let record = body
        .get("data")
        .cloned()
        .filter(|v| !v.is_null())
        .ok_or_else(|| AdapterError::invalid_response("expected record under 'data'"))?;
    Ok(normalize_record(record))
}

/// Synthesize a `status` field from the ERP's `active` boolean.
pub(crate) fn normalize_record(mut record: Value) -> Value {
    if let Some(active) = record.get("active").and_then(Value::as_bool) {
        if let Some(map) = record.as_object_mut() {
            map.insert(
                "status".to_string(),
                json!(if active { "active" } else { "inactive" }),
            );
        }
    }
    record
}

/// Fold a caller-supplied `status` back into the ERP's `active` boolean.
pub(crate) fn denormalize_record(mut data: Value) -> Value {
    if let Some(map) = data.as_object_mut() {
        if let Some(status) = map.remove("status").as_ref().and_then(Value::as_str) {
            map.insert("active".to_string(), json!(status == "active"));
        }
    }
    data
}

/// Identifier of a record, for bulk outcome reporting. ERP ids are numeric.
pub(crate) fn record_id(record: &Value) -> Option<String> {
    match record.get("id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    }
}
