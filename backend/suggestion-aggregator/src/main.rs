use anyhow::{Context, Result};
use suggestion_aggregator::{jobs, Config};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,suggestion_aggregator=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting suggestion generation");

    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;

    let report = jobs::run(&config).context("Suggestion generation failed")?;
    if report.records_skipped > 0 {
        info!(
            skipped = report.records_skipped,
            "Some warehouse records were malformed and excluded"
        );
    }

    Ok(())
}
