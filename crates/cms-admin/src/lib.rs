//! Admin-side data provider for the CMS content API.
//!
//! Exposes the generic list/get/create/update/delete interface an admin UI
//! expects, backed by the read-only content API over HTTP.

pub mod client;
pub mod error;
pub mod provider;

pub use client::ApiClient;
pub use error::ProviderError;
pub use provider::{
    AdminProvider, AdminRecord, EchoRecord, ListQuery, ListResult, Operation, ResourceKind,
};
