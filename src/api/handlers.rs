// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::errors::ApiError;
use super::http_server::AppState;
use crate::cache::CacheStats;
use crate::extract::{ModRecord, SearchResultItem};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub cache: CacheStatsResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CacheStatsResponse {
    pub total: usize,
    pub expired: usize,
    pub max: Option<usize>,
}

impl From<CacheStats> for CacheStatsResponse {
    fn from(stats: CacheStats) -> Self {
        Self {
            total: stats.total,
            expired: stats.expired,
            max: stats.max,
        }
    }
}

/// GET /d/:type/:id - Mod or modpack detail page
pub async fn detail_handler(
    State(state): State<AppState>,
    Path((kind, id)): Path<(String, String)>,
) -> Result<Json<ModRecord>, ApiError> {
    state
        .service
        .mod_detail(&kind, &id)
        .await
        .map(Json)
        .map_err(|e| {
            warn!("Detail request {}/{} failed: {}", kind, id, e);
            ApiError::Detail(e)
        })
}

/// GET /s/*query - Search results for a raw query string
///
/// The rest of the path is passed through as the upstream query string,
/// e.g. `/s/key=Example&page=2`.
pub async fn search_handler(
    State(state): State<AppState>,
    Path(query): Path<String>,
) -> Result<Json<Vec<SearchResultItem>>, ApiError> {
    state
        .service
        .search(&query)
        .await
        .map(Json)
        .map_err(|e| {
            warn!("Search request '{}' failed: {}", query, e);
            ApiError::Search(e)
        })
}

/// GET /health - Liveness plus cache statistics
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        cache: state.service.cache_stats().into(),
    })
}
