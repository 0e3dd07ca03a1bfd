use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;
use ksql_catalog::CatalogClient;

use crate::config::{Config, resolve_config_path};
use crate::output::{print_report, print_success};
use crate::reconcile;

fn load_entries(cli_config: Option<&Path>) -> Result<Config> {
    let (path, source) = resolve_config_path(cli_config);
    let config = Config::load(&path)?;
    tracing::info!(
        path = %path.display(),
        source = %source,
        entries = config.entries.len(),
        "Configuration loaded"
    );
    Ok(config)
}

pub async fn apply(client: &dyn CatalogClient, cli_config: Option<&Path>) -> Result<()> {
    let config = load_entries(cli_config)?;
    let report = reconcile::reconcile(client, &config.entries)
        .await
        .context("Reconciliation aborted")?;
    print_report(&report);
    Ok(())
}

pub async fn check(client: &dyn CatalogClient, cli_config: Option<&Path>) -> Result<()> {
    let config = load_entries(cli_config)?;
    let verified = reconcile::check(client, &config.entries)
        .await
        .context("Drift check failed")?;
    for name in &verified {
        println!("  {} {}", "=".dimmed(), name.cyan());
    }
    print_success(&format!("{} existing entries match the server", verified.len()));
    Ok(())
}
