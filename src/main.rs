// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Context, Result};
use mcmod_api::{
    api::{start_server, AppState},
    ApiConfig, HttpPageSource, McmodService,
};
use std::{env, sync::Arc};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = ApiConfig::from_env();
    config.validate().map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    let source = HttpPageSource::new(config.fetch_timeout(), &config.user_agent)
        .context("Failed to create HTTP client")?;
    let addr = config.listen_addr().context("Invalid API_HOST/API_PORT")?;

    tracing::info!(
        "Serving {} (cache TTL {}s, redirects: {:?})",
        config.source_host,
        config.cache_ttl_secs,
        config.redirect_strategy
    );

    let service = McmodService::new(config, Arc::new(source));
    start_server(AppState::new(service), addr).await?;

    Ok(())
}
