//! Request and sync option types
//!
//! `ListOptions` is the one pagination/query shape shared by every resource
//! group; each adapter translates it into its backend's native parameters.
//! `SyncOptions`/`SyncReport` belong to the sync orchestrator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::types::ResourceType;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Options accepted by every `list`/`search` operation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListOptions {
    /// One-indexed page number. Defaults to 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,

    /// Page size. Defaults to 50.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Field to sort by, in the backend's own field naming.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,

    /// Sort direction, meaningful only with `sort_by`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort_order: Option<SortOrder>,

    /// Free-text search term.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    /// Arbitrary filters, passed through in the backend's query shape.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub filters: HashMap<String, String>,
}

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 50;

impl ListOptions {
    /// Create empty options (first page, default limit).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page number (one-indexed).
    #[must_use]
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page);
        self
    }

    /// Set the page size.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the sort field and direction.
    #[must_use]
    pub fn with_sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    /// Set the free-text search term.
    #[must_use]
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Add one filter.
    #[must_use]
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.insert(key.into(), value.into());
        self
    }

    /// Effective page number (always >= 1).
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(DEFAULT_PAGE).max(1)
    }

    /// Effective page size.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Zero-based offset equivalent of `page`/`limit`, for offset-based
    /// backends. Page 1 always maps to offset 0.
    #[must_use]
    pub fn offset(&self) -> u32 {
        (self.page() - 1).saturating_mul(self.limit())
    }
}

/// Outcome of a read-only connection probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionTest {
    pub success: bool,
    pub response_time_ms: u64,
    pub message: String,
}

impl ConnectionTest {
    /// A successful probe.
    pub fn ok(response_time_ms: u64, message: impl Into<String>) -> Self {
        Self {
            success: true,
            response_time_ms,
            message: message.into(),
        }
    }

    /// A failed probe.
    pub fn failed(response_time_ms: u64, message: impl Into<String>) -> Self {
        Self {
            success: false,
            response_time_ms,
            message: message.into(),
        }
    }
}

/// Options for one sync run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SyncOptions {
    /// Resource groups to process. Empty means the default core set.
    #[serde(default)]
    pub resource_types: Vec<ResourceType>,

    /// Page size used for each group's list call.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch_size: Option<u32>,

    /// Include soft-deleted records where the backend distinguishes them.
    #[serde(default)]
    pub include_deleted: bool,

    /// Only records updated at or after this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_after: Option<DateTime<Utc>>,

    /// Only records updated before this instant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_before: Option<DateTime<Utc>>,
}

const DEFAULT_BATCH_SIZE: u32 = 100;

impl SyncOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the resource groups to process.
    #[must_use]
    pub fn with_resource_types(mut self, types: Vec<ResourceType>) -> Self {
        self.resource_types = types;
        self
    }

    /// Set the per-group batch size.
    #[must_use]
    pub fn with_batch_size(mut self, size: u32) -> Self {
        self.batch_size = Some(size);
        self
    }

    /// Include soft-deleted records.
    #[must_use]
    pub fn with_deleted(mut self) -> Self {
        self.include_deleted = true;
        self
    }

    /// Restrict to records updated within the given range.
    #[must_use]
    pub fn with_updated_between(
        mut self,
        after: Option<DateTime<Utc>>,
        before: Option<DateTime<Utc>>,
    ) -> Self {
        self.updated_after = after;
        self.updated_before = before;
        self
    }

    /// Effective batch size.
    #[must_use]
    pub fn batch_size(&self) -> u32 {
        self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE)
    }

    /// Effective resource groups, falling back to the default core set.
    #[must_use]
    pub fn effective_types(&self) -> Vec<ResourceType> {
        if self.resource_types.is_empty() {
            ResourceType::sync_default().to_vec()
        } else {
            self.resource_types.clone()
        }
    }

    /// Translate the sync-level record filters into list filters.
    #[must_use]
    pub fn list_options(&self) -> ListOptions {
        let mut options = ListOptions::new().with_page(1).with_limit(self.batch_size());
        if self.include_deleted {
            options = options.with_filter("include_deleted", "true");
        }
        if let Some(after) = self.updated_after {
            options = options.with_filter("updated_after", after.to_rfc3339());
        }
        if let Some(before) = self.updated_before {
            options = options.with_filter("updated_before", before.to_rfc3339());
        }
        options
    }
}

/// Overall outcome of a sync run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// The run is still in flight.
    Running,
    /// Every requested group succeeded.
    Completed,
    /// At least one group succeeded and at least one failed.
    Partial,
    /// Every requested group failed.
    Failed,
}

impl SyncStatus {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            SyncStatus::Running => "running",
            SyncStatus::Completed => "completed",
            SyncStatus::Partial => "partial",
            SyncStatus::Failed => "failed",
        }
    }
}

/// Per-group counters of one sync run, in requested order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceCount {
    pub resource: ResourceType,
    pub processed: u64,
    pub failed: u64,
}

/// One error recorded during a sync run, tagged by resource group.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncError {
    pub resource: ResourceType,
    pub message: String,
}

/// Immutable record of one completed sync run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    /// Identifier of this run.
    pub id: uuid::Uuid,
    /// When the run started.
    pub started_at: DateTime<Utc>,
    /// When the run finished. `None` only while the run is in flight.
    pub finished_at: Option<DateTime<Utc>>,
    /// Overall status, fully determined by the per-group outcomes.
    pub status: SyncStatus,
    /// Per-group counters, in requested order.
    pub counts: Vec<ResourceCount>,
    /// Errors in occurrence order, tagged by resource group.
    pub errors: Vec<SyncError>,
}

impl SyncReport {
    /// Start a new, running report.
    pub fn begin() -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            started_at: Utc::now(),
            finished_at: None,
            status: SyncStatus::Running,
            counts: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Record a successful group.
    pub fn record_processed(&mut self, resource: ResourceType, processed: u64) {
        self.counts.push(ResourceCount {
            resource,
            processed,
            failed: 0,
        });
    }

    /// Record a failed group with one tagged error.
    pub fn record_failure(&mut self, resource: ResourceType, message: impl Into<String>) {
        self.counts.push(ResourceCount {
            resource,
            processed: 0,
            failed: 1,
        });
        self.errors.push(SyncError {
            resource,
            message: message.into(),
        });
    }

    /// Close the run, deriving the final status from the per-group outcomes.
    pub fn finish(&mut self) {
        let failed_groups = self.counts.iter().filter(|c| c.failed > 0).count();
        self.status = if failed_groups == 0 {
            SyncStatus::Completed
        } else if failed_groups == self.counts.len() {
            SyncStatus::Failed
        } else {
            SyncStatus::Partial
        };
        self.finished_at = Some(Utc::now());
    }

    /// Total records counted across all groups.
    #[must_use]
    pub fn records_processed(&self) -> u64 {
        self.counts.iter().map(|c| c.processed).sum()
    }

    /// Total failures across all groups.
    #[must_use]
    pub fn records_failed(&self) -> u64 {
        self.counts.iter().map(|c| c.failed).sum()
    }

    /// Whether the run made any progress at all.
    #[must_use]
    pub fn made_progress(&self) -> bool {
        matches!(self.status, SyncStatus::Completed | SyncStatus::Partial)
    }
}

/// Outcome of one item within a bulk operation, in input order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkOutcome {
    /// Position of the item in the input.
    pub index: usize,
    /// Identifier of the created/updated record, when the item succeeded.
    pub id: Option<String>,
    /// Failure message, when the item failed.
    pub error: Option<String>,
}

impl BulkOutcome {
    /// A successful item.
    pub fn ok(index: usize, id: impl Into<String>) -> Self {
        Self {
            index,
            id: Some(id.into()),
            error: None,
        }
    }

    /// A failed item.
    pub fn failed(index: usize, message: impl Into<String>) -> Self {
        Self {
            index,
            id: None,
            error: Some(message.into()),
        }
    }

    /// Whether this item succeeded.
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
