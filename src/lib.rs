// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cache;
pub mod config;
pub mod extract;
pub mod service;
pub mod upstream;

// Re-export main types
pub use api::{create_app, AppState};
pub use config::ApiConfig;
pub use extract::{ModRecord, SearchItemData, SearchResultItem};
pub use service::McmodService;
pub use upstream::{HttpPageSource, PageSource, UpstreamError};
