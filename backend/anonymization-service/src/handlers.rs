use crate::services::ConsumerStats;
use actix_web::{web, HttpResponse};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub events_received: u64,
    pub events_anonymized: u64,
    pub events_dead_lettered: u64,
}

/// GET /health
pub async fn health_check(stats: web::Data<Arc<ConsumerStats>>) -> HttpResponse {
    let snapshot = stats.snapshot();
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        events_received: snapshot.events_received,
        events_anonymized: snapshot.events_anonymized,
        events_dead_lettered: snapshot.events_dead_lettered,
    })
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
