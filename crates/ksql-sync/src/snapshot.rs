use ksql_catalog::{CatalogClient, ListKind};

use crate::reconcile::ReconcileError;

/// Sorted stream and table names observed from one pair of `LIST` calls.
///
/// Snapshots are never updated in place; each pass fetches a fresh one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    streams: Vec<String>,
    tables: Vec<String>,
}

impl CatalogSnapshot {
    pub fn new(mut streams: Vec<String>, mut tables: Vec<String>) -> Self {
        streams.sort();
        tables.sort();
        Self { streams, tables }
    }

    /// Lists streams, then tables.
    pub async fn fetch(client: &dyn CatalogClient) -> Result<Self, ReconcileError> {
        let streams = client
            .list(ListKind::Streams)
            .await
            .map_err(|source| ReconcileError::List {
                kind: ListKind::Streams,
                source,
            })?;
        let tables = client
            .list(ListKind::Tables)
            .await
            .map_err(|source| ReconcileError::List {
                kind: ListKind::Tables,
                source,
            })?;
        let snapshot = Self::new(streams, tables);
        tracing::debug!(
            streams = snapshot.streams().len(),
            tables = snapshot.tables().len(),
            "Fetched catalog snapshot"
        );
        Ok(snapshot)
    }

    pub fn streams(&self) -> &[String] {
        &self.streams
    }

    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// True when `name` is a known stream or table.
    pub fn contains(&self, name: &str) -> bool {
        in_sorted_slice(&self.streams, name) || in_sorted_slice(&self.tables, name)
    }
}

/// Binary-search membership test. `slice` must be sorted.
pub fn in_sorted_slice<T: AsRef<str>>(slice: &[T], item: &str) -> bool {
    slice.binary_search_by(|probe| probe.as_ref().cmp(item)).is_ok()
}
