//! Shared type definitions
//!
//! Backend identity, connection status, and resource-group enums.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of external back-office system an adapter binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// General commerce back-office.
    Commerce,
    /// Regional retail back-office / ERP.
    #[serde(rename = "regional_erp")]
    RegionalErp,
    /// Cloud accounting and bookkeeping platform.
    Accounting,
}

impl BackendType {
    /// Get all known backend types.
    #[must_use]
    pub fn all() -> &'static [BackendType] {
        &[
            BackendType::Commerce,
            BackendType::RegionalErp,
            BackendType::Accounting,
        ]
    }

    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendType::Commerce => "commerce",
            BackendType::RegionalErp => "regional_erp",
            BackendType::Accounting => "accounting",
        }
    }
}

impl fmt::Display for BackendType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BackendType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "commerce" => Ok(BackendType::Commerce),
            "regional_erp" | "erp" => Ok(BackendType::RegionalErp),
            "accounting" => Ok(BackendType::Accounting),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                expected: "commerce, regional_erp, accounting",
            }),
        }
    }
}

/// Live status of an adapter's connection to its backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionStatus {
    /// Not connected (initial state, or after `disconnect`).
    #[default]
    Disconnected,
    /// A multi-step handshake is in flight. Only observable by callers
    /// polling status during a slow `connect`.
    Connecting,
    /// Handshake succeeded; requests can be issued.
    Connected,
    /// The last connect attempt or an authenticated request failed.
    Error,
}

impl ConnectionStatus {
    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Connecting => "connecting",
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Error => "error",
        }
    }
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One of the ten uniform resource capability groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Products,
    Variants,
    Regions,
    Taxes,
    Users,
    Customers,
    Orders,
    SalesChannels,
    Inventory,
    Warehouses,
}

impl ResourceType {
    /// All resource groups, in contract order.
    #[must_use]
    pub fn all() -> &'static [ResourceType] {
        &[
            ResourceType::Products,
            ResourceType::Variants,
            ResourceType::Regions,
            ResourceType::Taxes,
            ResourceType::Users,
            ResourceType::Customers,
            ResourceType::Orders,
            ResourceType::SalesChannels,
            ResourceType::Inventory,
            ResourceType::Warehouses,
        ]
    }

    /// The default set a sync run processes when none is requested.
    #[must_use]
    pub fn sync_default() -> &'static [ResourceType] {
        &[
            ResourceType::Products,
            ResourceType::Customers,
            ResourceType::Orders,
        ]
    }

    /// Get the string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Products => "products",
            ResourceType::Variants => "variants",
            ResourceType::Regions => "regions",
            ResourceType::Taxes => "taxes",
            ResourceType::Users => "users",
            ResourceType::Customers => "customers",
            ResourceType::Orders => "orders",
            ResourceType::SalesChannels => "sales_channels",
            ResourceType::Inventory => "inventory",
            ResourceType::Warehouses => "warehouses",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "products" => Ok(ResourceType::Products),
            "variants" => Ok(ResourceType::Variants),
            "regions" => Ok(ResourceType::Regions),
            "taxes" => Ok(ResourceType::Taxes),
            "users" => Ok(ResourceType::Users),
            "customers" => Ok(ResourceType::Customers),
            "orders" => Ok(ResourceType::Orders),
            "sales_channels" => Ok(ResourceType::SalesChannels),
            "inventory" => Ok(ResourceType::Inventory),
            "warehouses" => Ok(ResourceType::Warehouses),
            _ => Err(ParseEnumError {
                value: s.to_string(),
                expected: "a resource group name such as products or orders",
            }),
        }
    }
}

/// Error parsing one of the enums above from a string.
#[derive(Debug, Clone)]
pub struct ParseEnumError {
    value: String,
    expected: &'static str,
}

impl fmt::Display for ParseEnumError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid value '{}', expected {}", self.value, self.expected)
    }
}

impl std::error::Error for ParseEnumError {}

/// Identity and live status of one configured backend.
///
/// Created when an adapter is instantiated and mutated only by that
/// adapter's own connect/disconnect/sync operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemInfo {
    /// Stable identifier for this adapter instance.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Backend kind.
    pub backend: BackendType,
    /// Backend version string, learned during the connect handshake.
    pub version: String,
    /// Resource groups this backend actually implements.
    pub capabilities: Vec<ResourceType>,
    /// Current connection status.
    pub status: ConnectionStatus,
    /// Timestamp of the last sync run that made progress.
    pub last_sync: Option<DateTime<Utc>>,
    /// Round-trip time of the last connection probe, in milliseconds.
    pub response_time_ms: Option<u64>,
}

impl SystemInfo {
    /// Create info for a freshly instantiated, disconnected adapter.
    pub fn new(
        name: impl Into<String>,
        backend: BackendType,
        capabilities: Vec<ResourceType>,
    ) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            backend,
            version: String::new(),
            capabilities,
            status: ConnectionStatus::Disconnected,
            last_sync: None,
            response_time_ms: None,
        }
    }

    /// Whether this backend declares the given resource group.
    #[must_use]
    pub fn supports(&self, resource: ResourceType) -> bool {
        self.capabilities.contains(&resource)
    }
}
