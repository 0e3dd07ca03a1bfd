//! The capability set the reconciler needs from a KSQL server.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::CatalogError;
use crate::types::{ListKind, SourceDescription};

/// Operations against a KSQL catalog.
///
/// [`KsqlClient`](crate::KsqlClient) implements this over HTTP. Implementations
/// must be `Send + Sync` so they can be held behind `&dyn CatalogClient`.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Lists the names of all streams or tables, in server order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyResponse` when no result is returned and
    /// `CatalogError::MissingType` when the result has no `@type` string.
    async fn list(&self, kind: ListKind) -> Result<Vec<String>, CatalogError>;

    /// Describes a single stream or table.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::UnexpectedResultCount` unless exactly one
    /// description is returned.
    async fn describe(&self, name: &str) -> Result<SourceDescription, CatalogError>;

    /// Executes a statement and returns the raw result objects.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::EmptyResponse` when the server returns no result.
    async fn execute(&self, statement: &str) -> Result<Vec<Value>, CatalogError>;
}
