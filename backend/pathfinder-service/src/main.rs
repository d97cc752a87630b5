use actix_web::{web, App, HttpServer};
use anyhow::{Context, Result};
use pathfinder_service::{handlers, Config, SuggestionCache};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[actix_web::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info,pathfinder_service=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting pathfinder-service");

    let config = Config::from_env().context("Failed to load configuration")?;
    config
        .validate()
        .context("Configuration validation failed")?;
    info!(
        snapshot = %config.suggestion_cache_path.display(),
        "Configuration loaded, suggestion cache loads on first request"
    );

    // One cache shared by every worker
    let cache = web::Data::new(SuggestionCache::from_path(
        config.suggestion_cache_path.clone(),
    ));

    info!("Starting HTTP server on {}:{}", config.http_host, config.http_port);

    HttpServer::new(move || {
        App::new()
            .app_data(cache.clone())
            .configure(handlers::configure)
    })
    .bind((config.http_host.as_str(), config.http_port))
    .context("Failed to bind HTTP server")?
    .run()
    .await
    .context("HTTP server error")
}
