// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Shared helpers: an in-memory page source and a router built around it

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use mcmod_api::{
    cache::ManualClock, create_app, ApiConfig, AppState, McmodService, PageSource,
    UpstreamError,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt; // for `oneshot`

pub const DETAIL_PAGE: &str = include_str!("../fixtures/detail_page.html");
pub const SEARCH_PAGE: &str = include_str!("../fixtures/search_page.html");

/// Serves canned responses keyed by URL and counts fetches
#[derive(Default)]
pub struct FixtureSource {
    pages: Mutex<HashMap<String, Result<String, UpstreamError>>>,
    calls: AtomicUsize,
}

impl FixtureSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, body: &str) -> Self {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), Ok(body.to_string()));
        self
    }

    pub fn with_error(self, url: &str, error: UpstreamError) -> Self {
        self.pages.lock().unwrap().insert(url.to_string(), Err(error));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PageSource for FixtureSource {
    async fn fetch(&self, url: &str) -> Result<String, UpstreamError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .unwrap_or_else(|| {
                Err(UpstreamError::Status {
                    status: 404,
                    url: url.to_string(),
                })
            })
    }
}

pub struct TestApp {
    pub router: Router,
    pub source: Arc<FixtureSource>,
    pub clock: Arc<ManualClock>,
}

pub fn test_app(source: FixtureSource) -> TestApp {
    let source = Arc::new(source);
    let clock = Arc::new(ManualClock::new());
    let service = McmodService::with_clock(ApiConfig::default(), source.clone(), clock.clone());

    TestApp {
        router: create_app(AppState::new(service)),
        source,
        clock,
    }
}

/// Issue a GET and return status plus raw body bytes
pub async fn get(router: &Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, body.to_vec())
}

pub async fn get_json(router: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(router, uri).await;
    (status, serde_json::from_slice(&body).unwrap())
}
