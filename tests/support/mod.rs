#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::Router;
use serde_json::Value;
use tower::ServiceExt;

use marketlens::adapter::inbound::http::{create_router, AppState};
use marketlens::adapter::outbound::cache::MemoryStore;
use marketlens::application::{
    AnalyticsService, AnalyticsSettings, CacheOptions, ProjectionCache,
};
use marketlens::domain::ActionRecord;
use marketlens::testkit::clock::ManualClock;
use marketlens::testkit::directory::StaticDirectory;
use marketlens::testkit::source::MemorySource;

pub const NOW_MS: u64 = 1_700_000_000_000;

/// Router over in-memory collaborators, plus handles to steer them.
pub struct TestApp {
    pub router: Router,
    pub source: Arc<MemorySource>,
    pub clock: Arc<ManualClock>,
}

pub fn app(records: Vec<ActionRecord>, latest_block: u64) -> TestApp {
    app_with(records, latest_block, default_directory())
}

pub fn app_with(
    records: Vec<ActionRecord>,
    latest_block: u64,
    directory: StaticDirectory,
) -> TestApp {
    let source = Arc::new(MemorySource::new(records).with_latest_block(latest_block));
    let clock = Arc::new(ManualClock::new(NOW_MS));
    let cache = Arc::new(ProjectionCache::new(
        Arc::new(MemoryStore::new()),
        clock.clone(),
        CacheOptions::default(),
    ));
    let analytics = AnalyticsService::new(
        source.clone(),
        Arc::new(directory),
        cache,
        AnalyticsSettings::default(),
    );

    TestApp {
        router: create_router(AppState::new(Arc::new(analytics))),
        source,
        clock,
    }
}

/// Market `rain` (id 7) with outcomes Yes and No.
pub fn default_directory() -> StaticDirectory {
    StaticDirectory::new().with_market("rain", 7, &["Yes", "No"])
}

pub struct Reply {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl Reply {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

pub async fn get(router: &Router, uri: &str) -> Reply {
    let response = router
        .clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    Reply {
        status,
        headers,
        body,
    }
}
