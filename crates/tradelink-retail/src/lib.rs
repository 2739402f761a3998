//! # Retail ERP Adapter
//!
//! Adapter for the regional retail ERP.
//!
//! The ERP speaks a `data`/`meta` envelope, paginates with one-indexed
//! `page`/`per_page`, authenticates with basic credentials plus a company
//! scope header, and flags record liveness with an `active` boolean the
//! adapter translates to the uniform `status` field. Sales regions do not
//! exist on this backend, so every `regions` operation fails with
//! `NotSupported`.

mod adapter;
mod client;
mod query;
mod resources;

pub use adapter::RetailAdapter;
