//! # Back-Office Adapter Framework
//!
//! Core abstractions for talking to external back-office systems through
//! one uniform contract.
//!
//! This crate provides the foundation the concrete adapter crates build
//! on: connection configuration, authentication strategies, the request
//! executor, the ten resource capability groups, and sync orchestration.
//!
//! ## Architecture
//!
//! Adapters expose capabilities through traits with `NotSupported`
//! defaults:
//!
//! - [`adapter::BackofficeAdapter`] - Lifecycle, resource access, and sync
//! - [`api::ProductsApi`] .. [`api::WarehousesApi`] - The ten resource
//!   groups, every operation defaulting to a `NotSupported` failure
//! - [`executor::RequestExecutor`] - The single HTTP choke point, with a
//!   one-shot re-auth retry on 401
//!
//! ## Example
//!
//! ```ignore
//! use tradelink_connector::prelude::*;
//!
//! let config = ConnectionConfig::new(
//!     "https://shop.example.com",
//!     AuthConfig::api_key("sk_live_..."),
//! );
//!
//! // connect resolves to false on a rejected handshake, it does not fail
//! if adapter.connect(config).await? {
//!     let products = adapter
//!         .products()
//!         .list(&ListOptions::new().with_limit(25))
//!         .await?;
//!
//!     let report = adapter.sync(SyncOptions::new()).await?;
//!     println!("{} records in {:?}", report.records_processed(), report.status);
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`types`] - Enums and status types (`BackendType`, `ResourceType`)
//! - [`error`] - `AdapterError` with capability and auth classification
//! - [`config`] - `ConnectionConfig` and the three auth configurations
//! - [`auth`] - Runtime auth strategies, including the cached OAuth2
//!   client-credentials flow
//! - [`executor`] - HTTP request execution
//! - [`options`] - List, sync, and bulk option/result types
//! - [`api`] - The ten resource group traits
//! - [`adapter`] - The adapter contract and shared adapter state
//! - [`sync`] - The sync orchestrator

pub mod adapter;
pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod executor;
pub mod options;
pub mod sync;
pub mod types;

/// Prelude module for convenient imports.
///
/// ```
/// use tradelink_connector::prelude::*;
/// ```
pub mod prelude {
    // Types and enums
    pub use crate::types::{BackendType, ConnectionStatus, ResourceType, SystemInfo};

    // Error handling
    pub use crate::error::{AdapterError, AdapterResult};

    // Configuration
    pub use crate::config::{AuthConfig, ConnectionConfig};

    // Auth strategies
    pub use crate::auth::{ApiKeyAuth, AuthStrategy, BasicAuth, ClientCredentialsAuth};

    // Request execution
    pub use crate::executor::RequestExecutor;

    // Options and results
    pub use crate::options::{
        BulkOutcome, ConnectionTest, ListOptions, ResourceCount, SortOrder, SyncError, SyncOptions,
        SyncReport, SyncStatus,
    };

    // Resource groups
    pub use crate::api::{
        CustomersApi, InventoryApi, OrdersApi, ProductsApi, RegionsApi, SalesChannelsApi, TaxesApi,
        Unsupported, UsersApi, VariantsApi, WarehousesApi,
    };

    // Adapter contract
    pub use crate::adapter::{AdapterCore, BackofficeAdapter};
}

// Re-export async_trait for adapter implementors
pub use async_trait::async_trait;
