// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Upstream page fetching
//!
//! One attempt per request, bounded by the configured timeout. Failures are
//! classified so the HTTP layer can tell a slow upstream (504) from a broken
//! one (500).

pub mod source;

pub use source::{HttpPageSource, PageSource, UpstreamError};
