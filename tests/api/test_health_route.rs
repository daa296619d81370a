// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /health

use axum::http::StatusCode;

use super::common::{get_json, test_app, FixtureSource, DETAIL_PAGE};

#[tokio::test]
async fn test_health_reports_cache_stats() {
    let app = test_app(
        FixtureSource::new().with_page("https://www.mcmod.cn/class/12345.html", DETAIL_PAGE),
    );

    let (status, json) = get_json(&app.router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert_eq!(json["cache"]["total"], 0);
    assert_eq!(json["cache"]["max"], 1000);

    get_json(&app.router, "/d/class/12345").await;

    let (_, json) = get_json(&app.router, "/health").await;
    assert_eq!(json["cache"]["total"], 1);
}
