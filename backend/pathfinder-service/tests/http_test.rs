use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use event_schema::{SnapshotError, SuggestionEntry, SuggestionMap};
use pathfinder_service::{handlers, CacheState, SnapshotSource, SuggestionCache};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};

fn cache_with(entries: &[(&str, &str, u64)]) -> web::Data<SuggestionCache> {
    let map: SuggestionMap = entries
        .iter()
        .map(|(goal, step, count)| (goal.to_string(), SuggestionEntry::new(*step, *count)))
        .collect();
    web::Data::new(SuggestionCache::preloaded(map))
}

macro_rules! app {
    ($cache:expr) => {
        test::init_service(
            App::new()
                .app_data($cache.clone())
                .configure(handlers::configure),
        )
        .await
    };
}

#[actix_web::test]
async fn health_reports_loaded_cache() {
    let cache = cache_with(&[("Some Goal", "Some Step", 1)]);
    let app = app!(cache);

    let req = test::TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"status": "ok", "cache_loaded": true, "cached_items": 1})
    );
}

#[actix_web::test]
async fn health_succeeds_with_empty_cache() {
    let cache = cache_with(&[]);
    let app = app!(cache);

    let req = test::TestRequest::get().uri("/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        body,
        json!({"status": "ok", "cache_loaded": false, "cached_items": 0})
    );
}

#[actix_web::test]
async fn suggestion_found() {
    let cache = cache_with(&[("Learn Python", "Install Python & VS Code", 3)]);
    let app = app!(cache);

    let req = test::TestRequest::get()
        .uri("/suggestion/text?goal=Learn%20Python")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({"suggestion_text": "Install Python & VS Code", "count": 3})
    );
}

#[actix_web::test]
async fn suggestion_not_found() {
    let cache = cache_with(&[("Some Other Goal", "Some Step", 1)]);
    let app = app!(cache);

    let req = test::TestRequest::get()
        .uri("/suggestion/text?goal=Learn%20Go")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("No suggestion found"));
    assert_eq!(body["code"], json!(404));
}

#[actix_web::test]
async fn suggestion_empty_cache_is_unavailable() {
    let cache = cache_with(&[]);
    let app = app!(cache);

    let req = test::TestRequest::get()
        .uri("/suggestion/text?goal=Learn%20Python")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Suggestion cache is not loaded or empty"));
}

#[actix_web::test]
async fn goal_match_is_case_sensitive() {
    let cache = cache_with(&[("Learn Python", "Install Python", 2)]);
    let app = app!(cache);

    let req = test::TestRequest::get()
        .uri("/suggestion/text?goal=learn%20python")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn missing_or_empty_goal_is_bad_request() {
    let cache = cache_with(&[("Learn Python", "Install Python", 2)]);
    let app = app!(cache);

    for uri in ["/suggestion/text", "/suggestion/text?goal="] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
    }
}

#[actix_web::test]
async fn snapshot_file_is_served() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("suggestion_cache.json");
    std::fs::write(
        &path,
        json!({"Learn Rust": {"suggestion_text": "Read the book", "count": 5}}).to_string(),
    )
    .unwrap();

    let cache = web::Data::new(SuggestionCache::from_path(&path));
    let app = app!(cache);

    let req = test::TestRequest::get()
        .uri("/suggestion/text?goal=Learn%20Rust")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body, json!({"suggestion_text": "Read the book", "count": 5}));
}

/// Source that records how often and on which thread it was read
#[derive(Clone, Default)]
struct TracingSource {
    loads: Arc<AtomicUsize>,
    load_thread: Arc<Mutex<Option<ThreadId>>>,
}

impl SnapshotSource for TracingSource {
    fn describe(&self) -> String {
        "tracing".to_string()
    }

    fn load(&self) -> Result<SuggestionMap, SnapshotError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        *self.load_thread.lock().unwrap() = Some(thread::current().id());
        let mut map = SuggestionMap::new();
        map.insert("Learn Rust".to_string(), SuggestionEntry::new("Read the book", 5));
        Ok(map)
    }
}

#[actix_web::test]
async fn first_request_loads_off_the_worker_thread() {
    let source = TracingSource::default();
    let cache = web::Data::new(SuggestionCache::new(source.clone()));
    let app = app!(cache);
    assert_eq!(cache.state(), CacheState::Unloaded);

    for uri in [
        "/suggestion/text?goal=Learn%20Rust",
        "/health",
        "/suggestion/text?goal=Learn%20Go",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        test::call_service(&app, req).await;
    }

    assert_eq!(source.loads.load(Ordering::SeqCst), 1);
    assert_eq!(cache.state(), CacheState::Loaded);
    let load_thread = source.load_thread.lock().unwrap().unwrap();
    assert_ne!(load_thread, thread::current().id());
}
