//! # ksql-catalog
//!
//! Thin typed client for the subset of the KSQL REST API needed to reconcile
//! streams and tables against a desired state.
//!
//! ## Overview
//!
//! The [`CatalogClient`] trait exposes three operations:
//! - `list` - names of the existing streams or tables
//! - `describe` - the [`SourceDescription`] of one object
//! - `execute` - run a statement with the fixed streams properties
//!
//! [`KsqlClient`] implements it over HTTP. Tests substitute an in-memory fake.
//!
//! ## Example
//!
//! ```ignore
//! use ksql_catalog::{CatalogClient, KsqlClient, ListKind};
//!
//! let client = KsqlClient::new("http://localhost:8088");
//! let streams = client.list(ListKind::Streams).await?;
//! ```

mod client;
mod error;
mod traits;
mod types;

pub use client::{KSQL_MEDIA_TYPE, KsqlClient};
pub use error::CatalogError;
pub use traits::CatalogClient;
pub use types::{
    DescriptionResult, Field, FieldSchema, KsqlRequest, KsqlServerInfo, ListKind, QueryInfo,
    ServerInfoResponse, SourceDescription, StreamsProperties,
};
