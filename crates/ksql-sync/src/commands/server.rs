use anyhow::{Context, Result};
use colored::Colorize;
use ksql_catalog::KsqlClient;

pub async fn status(client: &KsqlClient) -> Result<()> {
    let info = client
        .info()
        .await
        .with_context(|| format!("{} is not healthy", client.base_url()))?;
    println!(
        "{} {} is {}",
        "✓".green(),
        client.base_url().cyan(),
        "healthy".green()
    );
    println!("  {}: {}", "Service".cyan(), info.ksql_service_id);
    println!("  {}: {}", "Version".cyan(), info.version);
    if !info.kafka_cluster_id.is_empty() {
        println!("  {}: {}", "Kafka cluster".cyan(), info.kafka_cluster_id);
    }
    Ok(())
}
