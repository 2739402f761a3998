//! # Commerce Adapter
//!
//! Adapter for the commerce back-office admin API.
//!
//! The commerce backend is the richest of the supported systems: it
//! implements all ten resource groups and the optional platform
//! operations. Authentication is a static API key in a configurable
//! header (`x-api-key` by default), pagination is zero-based
//! `offset`/`limit`, and every response arrives in a keyed envelope.
//!
//! ```ignore
//! use tradelink_commerce::CommerceAdapter;
//! use tradelink_connector::prelude::*;
//!
//! let adapter = CommerceAdapter::new();
//! let config = ConnectionConfig::new(
//!     "https://shop.example.com",
//!     AuthConfig::api_key("sk_live_..."),
//! );
//! if adapter.connect(config).await? {
//!     let products = adapter.products().list(&ListOptions::new()).await?;
//! }
//! ```

mod adapter;
mod catalog;
mod client;
mod inventory;
mod orders;
mod query;
mod settings;

pub use adapter::CommerceAdapter;
