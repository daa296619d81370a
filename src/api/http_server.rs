// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{detail_handler, health_handler, search_handler};
use crate::service::McmodService;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<McmodService>,
}

impl AppState {
    pub fn new(service: McmodService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }
}

/// Build the router; tests drive it directly without binding a socket
pub fn create_app(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_handler))
        // Detail pages: /d/class/12345, /d/modpack/77
        .route("/d/:type/:id", get(detail_handler))
        // Search: /s/key=Example
        .route("/s/*query", get(search_handler))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

pub async fn start_server(state: AppState, addr: SocketAddr) -> std::io::Result<()> {
    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
