use anyhow::Context;
use tracing_subscriber::EnvFilter;

use weatherlens::config::WeatherLensConfig;
use weatherlens::web;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Fail fast on missing API keys before binding anything
    let config = WeatherLensConfig::from_env().context("Invalid configuration")?;
    tracing::info!(
        environment = %config.environment,
        port = config.port,
        "Starting weatherlens"
    );

    web::run(config).await
}
