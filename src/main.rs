use anyhow::{Context, Result};
use mcp_probe::{ProbeClient, ProbeConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Diagnostics go to stderr so stdout carries only the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "mcp_probe=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load .env for local dev (if present)
    if dotenvy::dotenv().is_ok() {
        tracing::info!("Loaded .env");
    }

    let config = ProbeConfig::from_env().context("failed to load probe configuration")?;
    tracing::info!(
        "Configuration loaded: url={}, method={}",
        config.server.url,
        config.request.method
    );

    let client = ProbeClient::new(config)?;
    let mut stdout = std::io::stdout();
    let outcome = client
        .run(&mut stdout)
        .await
        .with_context(|| format!("probe of {} failed", client.config().server.url))?;

    match outcome.tools {
        Some(tools) => tracing::info!("Probe complete: {} tools advertised", tools.len()),
        None => tracing::info!("Probe complete"),
    }

    Ok(())
}
