use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Server used when neither --server nor KSQL_SERVER is set.
pub const DEFAULT_SERVER: &str = "http://localhost:8088";

#[derive(Parser)]
#[command(name = "ksql-sync")]
#[command(about = "Reconcile KSQL streams and tables against a declarative entries file")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// KSQL server base URL (the /ksql endpoint is appended)
    #[arg(short, long, global = true, env = "KSQL_SERVER")]
    pub server: Option<String>,

    /// Entries file (overrides KSQL_CONFIG, defaults to config.yaml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, env = "KSQL_SYNC_LOG", default_value = "info")]
    pub log_level: String,
}

impl Cli {
    /// The server base URL. An empty --server or KSQL_SERVER counts as unset.
    pub fn server_url(&self) -> &str {
        self.server
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(DEFAULT_SERVER)
    }
}

#[derive(Subcommand, Clone, Copy, Default, PartialEq, Eq, Debug)]
pub enum Commands {
    /// Check for drift, then create missing entries and run statements (default)
    #[default]
    Apply,
    /// Check for drift only
    Check,
    /// Check server health via /info
    Status,
}
