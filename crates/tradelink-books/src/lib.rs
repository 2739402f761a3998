//! # Accounting Adapter
//!
//! Adapter for the cloud accounting platform.
//!
//! The platform speaks an OData-style API (`$top`/`$skip` pagination, a
//! `value` collection envelope, bare single records) and authenticates
//! with the OAuth2 client-credentials flow, tenant-scoped through the
//! `X-Tenant-Id` header. Orders map onto sales invoices, customers onto
//! contacts, and regions onto tax jurisdictions. Sales channels and
//! warehouses have no counterpart here and fail with `NotSupported`.

mod adapter;
mod catalog;
mod client;
mod contacts;
mod ledger;
mod query;

pub use adapter::BooksAdapter;
