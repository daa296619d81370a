// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! Response caching across requests

use axum::http::StatusCode;
use std::time::Duration;

use super::common::{get, test_app, FixtureSource, DETAIL_PAGE, SEARCH_PAGE};

#[tokio::test]
async fn test_repeat_detail_within_ttl_is_identical_and_not_refetched() {
    let app = test_app(
        FixtureSource::new().with_page("https://www.mcmod.cn/class/12345.html", DETAIL_PAGE),
    );

    let (_, first) = get(&app.router, "/d/class/12345").await;
    app.clock.advance(Duration::from_secs(120));
    let (_, second) = get(&app.router, "/d/class/12345").await;

    assert_eq!(first, second);
    assert_eq!(app.source.calls(), 1);
}

#[tokio::test]
async fn test_repeat_search_after_ttl_is_refetched() {
    let app = test_app(
        FixtureSource::new().with_page("https://search.mcmod.cn/s?key=Example", SEARCH_PAGE),
    );

    let (status, _) = get(&app.router, "/s/key=Example").await;
    assert_eq!(status, StatusCode::OK);

    app.clock.advance(Duration::from_secs(301));
    let (status, _) = get(&app.router, "/s/key=Example").await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(app.source.calls(), 2);
}

#[tokio::test]
async fn test_failed_fetch_is_retried_on_next_request() {
    let app = test_app(FixtureSource::new());

    let (status, _) = get(&app.router, "/d/class/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let (status, _) = get(&app.router, "/d/class/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(app.source.calls(), 2);
}
