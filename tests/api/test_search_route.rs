// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1

//! GET /s/*query

use axum::http::StatusCode;
use mcmod_api::UpstreamError;

use super::common::{get_json, test_app, FixtureSource, SEARCH_PAGE};

const SEARCH_URL: &str = "https://search.mcmod.cn/s?key=Example";

#[tokio::test]
async fn test_search_end_to_end() {
    let app = test_app(FixtureSource::new().with_page(SEARCH_URL, SEARCH_PAGE));

    let (status, json) = get_json(&app.router, "/s/key=Example").await;
    assert_eq!(status, StatusCode::OK);

    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 3);

    let first = &items[0];
    assert_eq!(first["address"], "https://www.mcmod.cn/class/12345.html");
    assert_eq!(first["data"]["mcmod_id"], "12345");
    assert_eq!(first["data"]["abbr"], "EX");
    assert_eq!(first["data"]["chinese_name"], "Example Mod");
    assert_eq!(first["data"]["sub_name"], "ExampleMod");
}

#[tokio::test]
async fn test_search_bare_item() {
    let app = test_app(FixtureSource::new().with_page(SEARCH_URL, SEARCH_PAGE));

    let (_, json) = get_json(&app.router, "/s/key=Example").await;
    let bare = &json[1];

    assert_eq!(bare["address"], "https://center.mcmod.cn/2001/");
    assert_eq!(bare["snapshot_time"], "2024-05-01");
    assert_eq!(bare["description"], "用户主页");
    for field in ["mcmod_id", "abbr", "chinese_name", "sub_name", "category"] {
        assert!(bare["data"][field].is_null(), "{} should be null", field);
    }
}

#[tokio::test]
async fn test_search_without_results_is_empty_array() {
    let app = test_app(
        FixtureSource::new().with_page(SEARCH_URL, "<html><body>没有找到结果</body></html>"),
    );

    let (status, json) = get_json(&app.router, "/s/key=Example").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json, serde_json::json!([]));
}

#[tokio::test]
async fn test_search_query_with_multiple_parameters() {
    let app = test_app(FixtureSource::new().with_page(
        "https://search.mcmod.cn/s?key=Example&filter=1",
        SEARCH_PAGE,
    ));

    let (status, _) = get_json(&app.router, "/s/key=Example&filter=1").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_search_upstream_failure_is_500() {
    let app = test_app(FixtureSource::new().with_error(
        SEARCH_URL,
        UpstreamError::Status {
            status: 502,
            url: SEARCH_URL.to_string(),
        },
    ));

    let (status, json) = get_json(&app.router, "/s/key=Example").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json["errorMessage"],
        "Get 'https://search.mcmod.cn/s?key=Example' Error."
    );
    assert!(json["error"].as_str().unwrap().contains("502"));
}

#[tokio::test]
async fn test_search_upstream_timeout_is_504() {
    let app = test_app(FixtureSource::new().with_error(
        SEARCH_URL,
        UpstreamError::Timeout {
            url: SEARCH_URL.to_string(),
            timeout_ms: 10000,
        },
    ));

    let (status, _) = get_json(&app.router, "/s/key=Example").await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
}
