use crate::cache::{CacheState, SuggestionCache};
use crate::error::{AppError, Result};
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    /// Goal to look up, matched exactly
    pub goal: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache_loaded: bool,
    pub cached_items: usize,
}

/// Perform the first snapshot read on the blocking pool instead of the worker thread
async fn ensure_loaded(cache: &web::Data<SuggestionCache>) -> Result<()> {
    if cache.state() != CacheState::Unloaded {
        return Ok(());
    }

    let cache = cache.clone();
    web::block(move || cache.ensure_loaded())
        .await
        .map_err(|e| AppError::Internal(format!("suggestion cache load failed: {}", e)))?;
    Ok(())
}

/// GET /health
///
/// Always 200; `cache_loaded = false` flags an instance stuck with an empty cache.
pub async fn health_check(cache: web::Data<SuggestionCache>) -> Result<HttpResponse> {
    ensure_loaded(&cache).await?;
    let health = cache.health();
    Ok(HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        cache_loaded: health.cache_loaded,
        cached_items: health.cached_items,
    }))
}

/// GET /suggestion/text?goal=<goal>
///
/// Most common first step for the goal. 503 when the cache is empty, 404 when
/// the goal is unknown.
pub async fn get_text_suggestion(
    cache: web::Data<SuggestionCache>,
    query: web::Query<SuggestionQuery>,
) -> Result<HttpResponse> {
    if query.goal.is_empty() {
        return Err(AppError::Validation("goal must not be empty".to_string()));
    }

    ensure_loaded(&cache).await?;
    let entry = cache.lookup(&query.goal)?;
    debug!(goal = %query.goal, count = entry.count, "Suggestion served");
    Ok(HttpResponse::Ok().json(entry))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::Validation(err.to_string()).into()
    }))
    .route("/health", web::get().to(health_check))
    .route("/suggestion/text", web::get().to(get_text_suggestion));
}
