// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /d/:type/:id

use axum::http::StatusCode;
use mcmod_api::UpstreamError;

use super::common::{get_json, test_app, FixtureSource, DETAIL_PAGE};

const DETAIL_URL: &str = "https://www.mcmod.cn/class/12345.html";

#[tokio::test]
async fn test_detail_end_to_end() {
    let app = test_app(FixtureSource::new().with_page(DETAIL_URL, DETAIL_PAGE));

    let (status, json) = get_json(&app.router, "/d/class/12345").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["title"], "Example Mod");
    assert_eq!(json["supported_versions"], serde_json::json!({ "Forge": ["1.20.1"] }));
    assert_eq!(json["authors"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_detail_has_stable_shape() {
    let app = test_app(
        FixtureSource::new().with_page(DETAIL_URL, "<html><body><h3>Bare</h3></body></html>"),
    );

    let (status, json) = get_json(&app.router, "/d/class/12345").await;
    assert_eq!(status, StatusCode::OK);

    let obj = json.as_object().unwrap();
    for field in [
        "title",
        "subtitle",
        "cover_image",
        "supported_versions",
        "related_links",
        "operating_environment",
        "tag_links",
        "short_name",
        "recorded_time",
        "last_edit_time",
        "last_recommend_time",
        "edit_count",
        "authors",
        "mod_relations",
    ] {
        assert!(obj.contains_key(field), "missing field {}", field);
    }
    assert!(json["subtitle"].is_null());
    assert_eq!(json["authors"], serde_json::json!([]));
}

#[tokio::test]
async fn test_detail_modpack_route() {
    let app = test_app(
        FixtureSource::new().with_page("https://www.mcmod.cn/modpack/77.html", DETAIL_PAGE),
    );

    let (status, _) = get_json(&app.router, "/d/modpack/77").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_detail_upstream_error_is_500() {
    let app = test_app(FixtureSource::new());

    let (status, json) = get_json(&app.router, "/d/class/404").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({ "error": "无法获取数据" }));
}

#[tokio::test]
async fn test_detail_upstream_timeout_is_504() {
    let app = test_app(FixtureSource::new().with_error(
        DETAIL_URL,
        UpstreamError::Timeout {
            url: DETAIL_URL.to_string(),
            timeout_ms: 10000,
        },
    ));

    let (status, _) = get_json(&app.router, "/d/class/12345").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}

#[tokio::test]
async fn test_detail_route_requires_two_segments() {
    let app = test_app(FixtureSource::new());

    let (status, _) = super::common::get(&app.router, "/d/class").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(app.source.calls(), 0);
}
