//! Two-pass reconciliation of configured entries against the server catalog.
//!
//! Pass 1 describes every drift-checked entry that already exists and aborts
//! when its write query differs from the configured text. Pass 2 re-lists the
//! catalog, executes every statement and creates every missing table or
//! stream. Pass 2 failures are recorded in the [`ReconcileReport`] and do not
//! stop the loop.
//!
//! Drifted objects are never dropped: drift is fatal and must be resolved by
//! hand before the next run.

use ksql_catalog::{CatalogClient, CatalogError, ListKind};

use crate::config::{Entry, EntryType};
use crate::snapshot::CatalogSnapshot;

/// Conditions that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("failed to list {kind}: {source}")]
    List {
        kind: ListKind,
        #[source]
        source: CatalogError,
    },

    #[error("failed to retrieve description of {name}: {source}")]
    Describe {
        name: String,
        #[source]
        source: CatalogError,
    },

    #[error("expected exactly one write query for {name}, found {count}")]
    WriteQueryCount { name: String, count: usize },

    #[error("query string for {name:?} has changed: {configured} VS {actual}")]
    Drift {
        name: String,
        configured: String,
        actual: String,
    },
}

#[derive(Debug)]
pub enum Outcome {
    Created,
    Executed,
    /// Already present in the catalog.
    Skipped,
    Failed(CatalogError),
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Executed => "executed",
            Self::Skipped => "exists",
            Self::Failed(_) => "failed",
        }
    }
}

#[derive(Debug)]
pub struct EntryOutcome {
    pub label: String,
    pub entry_type: EntryType,
    pub outcome: Outcome,
}

/// Per-entry results of pass 2, in entry order.
#[derive(Debug, Default)]
pub struct ReconcileReport {
    pub outcomes: Vec<EntryOutcome>,
}

impl ReconcileReport {
    fn push(&mut self, entry: &Entry, outcome: Outcome) {
        self.outcomes.push(EntryOutcome {
            label: entry.label().to_string(),
            entry_type: entry.entry_type,
            outcome,
        });
    }

    pub fn created(&self) -> Vec<&str> {
        self.labels(|o| matches!(o, Outcome::Created))
    }

    pub fn skipped(&self) -> Vec<&str> {
        self.labels(|o| matches!(o, Outcome::Skipped))
    }

    pub fn executed(&self) -> Vec<&str> {
        self.labels(|o| matches!(o, Outcome::Executed))
    }

    pub fn failures(&self) -> impl Iterator<Item = &EntryOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.outcome, Outcome::Failed(_)))
    }

    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    fn labels(&self, pred: impl Fn(&Outcome) -> bool) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|o| pred(&o.outcome))
            .map(|o| o.label.as_str())
            .collect()
    }
}

/// Full run: snapshot, drift detection, fresh snapshot, creation.
pub async fn reconcile(
    client: &dyn CatalogClient,
    entries: &[Entry],
) -> Result<ReconcileReport, ReconcileError> {
    let snapshot = CatalogSnapshot::fetch(client).await?;
    detect_drift(client, entries, &snapshot).await?;

    let snapshot = CatalogSnapshot::fetch(client).await?;
    Ok(create_missing(client, entries, &snapshot).await)
}

/// Drift detection only. Returns the names verified against the server.
pub async fn check(
    client: &dyn CatalogClient,
    entries: &[Entry],
) -> Result<Vec<String>, ReconcileError> {
    let snapshot = CatalogSnapshot::fetch(client).await?;
    detect_drift(client, entries, &snapshot).await
}

/// Pass 1. Returns the names of existing entries whose write query matches.
pub async fn detect_drift(
    client: &dyn CatalogClient,
    entries: &[Entry],
    snapshot: &CatalogSnapshot,
) -> Result<Vec<String>, ReconcileError> {
    let mut verified = Vec::new();
    for entry in entries.iter().filter(|e| e.is_drift_checked()) {
        if check_entry(client, entry, snapshot).await? {
            verified.push(entry.name.clone());
        }
    }
    Ok(verified)
}

/// Returns `Ok(false)` when the entry does not exist yet.
async fn check_entry(
    client: &dyn CatalogClient,
    entry: &Entry,
    snapshot: &CatalogSnapshot,
) -> Result<bool, ReconcileError> {
    if !snapshot.contains(&entry.name) {
        tracing::debug!(name = %entry.name, "Not in catalog, will be created");
        return Ok(false);
    }

    let description = client
        .describe(&entry.name)
        .await
        .map_err(|source| ReconcileError::Describe {
            name: entry.name.clone(),
            source,
        })?;

    let [write_query] = description.write_queries.as_slice() else {
        return Err(ReconcileError::WriteQueryCount {
            name: entry.name.clone(),
            count: description.write_queries.len(),
        });
    };

    if write_query.query_string != entry.ksql {
        return Err(ReconcileError::Drift {
            name: entry.name.clone(),
            configured: entry.ksql.clone(),
            actual: write_query.query_string.clone(),
        });
    }

    tracing::debug!(name = %entry.name, query_id = %write_query.id, "Write query unchanged");
    Ok(true)
}

/// Pass 2. Never fails; per-entry errors are logged and reported.
pub async fn create_missing(
    client: &dyn CatalogClient,
    entries: &[Entry],
    snapshot: &CatalogSnapshot,
) -> ReconcileReport {
    let mut report = ReconcileReport::default();

    for entry in entries {
        let outcome = match entry.entry_type {
            EntryType::Statement => match client.execute(&entry.ksql).await {
                Ok(_) => Outcome::Executed,
                Err(e) => {
                    tracing::warn!(statement = %entry.ksql, error = %e, "Failed to execute statement");
                    Outcome::Failed(e)
                }
            },
            EntryType::Table | EntryType::Stream => {
                if snapshot.contains(&entry.name) {
                    Outcome::Skipped
                } else {
                    tracing::info!(name = %entry.name, "Creating {}", entry.entry_type);
                    match client.execute(&entry.ksql).await {
                        Ok(_) => Outcome::Created,
                        Err(e) => {
                            tracing::warn!(name = %entry.name, error = %e, "Failed to create");
                            Outcome::Failed(e)
                        }
                    }
                }
            }
        };
        report.push(entry, outcome);
    }

    report
}
