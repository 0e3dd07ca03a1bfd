mod cli;
mod commands;
mod config;
mod observability;
mod output;
mod reconcile;
mod snapshot;

use anyhow::Result;
use clap::Parser;
use ksql_catalog::KsqlClient;

use cli::{Cli, Commands};
use output::print_error;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = dotenvy::dotenv()
        && !matches!(e, dotenvy::Error::Io(ref io_err) if io_err.kind() == std::io::ErrorKind::NotFound)
    {
        eprintln!("Warning: Failed to load .env file: {e}");
    }

    let cli = Cli::parse();
    observability::init_tracing_with_level(&cli.log_level);

    if let Err(e) = run(cli).await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let client = KsqlClient::new(cli.server_url());
    tracing::debug!(endpoint = %client.ksql_url(), "Using KSQL server");

    match cli.command.unwrap_or_default() {
        Commands::Apply => commands::sync::apply(&client, cli.config.as_deref()).await?,
        Commands::Check => commands::sync::check(&client, cli.config.as_deref()).await?,
        Commands::Status => commands::server::status(&client).await?,
    }

    Ok(())
}
