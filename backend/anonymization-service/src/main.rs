use actix_web::{web, App, HttpServer};
use anonymization_service::{
    handlers, services::read_raw_events, Anonymizer, Config, EventConsumer, JsonLinesSink,
};
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,anonymization_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting anonymization-service");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;
    if config.uses_development_salt() {
        warn!(
            app_env = %config.app_env,
            "Using development fallback salt - never run this in a live deployment"
        );
    }
    info!("Configuration loaded and validated");

    let sink = Arc::new(
        JsonLinesSink::open(&config.anonymized_events_path)
            .context("Failed to open anonymized event sink")?,
    );
    let dead_letters = Arc::new(
        JsonLinesSink::open(&config.dead_letter_path)
            .context("Failed to open dead letter sink")?,
    );
    info!(
        anonymized = %sink.path().display(),
        dead_letter = %dead_letters.path().display(),
        "Event sinks opened"
    );

    let consumer = Arc::new(EventConsumer::new(
        Anonymizer::new(&config.anonymization_salt),
        sink,
        dead_letters,
    ));
    let stats = consumer.stats();

    // Drain the raw event source in the background
    if let Some(raw_path) = config.raw_events_path.clone() {
        let consumer = Arc::clone(&consumer);
        tokio::task::spawn_blocking(move || {
            let path = PathBuf::from(raw_path);
            match read_raw_events(&path) {
                Ok(messages) => {
                    let summary = consumer.process_batch(messages);
                    info!(
                        processed = summary.processed,
                        anonymized = summary.anonymized,
                        dead_lettered = summary.dead_lettered,
                        "Raw event source drained"
                    );
                }
                Err(e) => error!(error = %e, "Failed to read raw event source"),
            }
        });
    }

    info!("Starting HTTP server on {}:{}", config.http_host, config.http_port);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&stats)))
            .configure(handlers::configure)
    })
    .bind((config.http_host.as_str(), config.http_port))
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")
}
