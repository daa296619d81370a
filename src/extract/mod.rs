// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Page extraction for the mod wiki
//!
//! Turns the two page shapes the service understands into structured records:
//! - mod / modpack detail pages → [`ModRecord`]
//! - search result listings → [`SearchResultItem`]s
//!
//! ## Architecture
//!
//! ```text
//! HTML → Page (markup) → detail / search extractor → records
//!                               ↓
//!                         LinkResolver (redirect)
//! ```
//!
//! Extraction is pure: the same markup always produces the same record, and
//! missing elements become `null` fields instead of errors.

pub mod detail;
pub mod markup;
pub mod redirect;
pub mod search;
pub mod types;

pub use detail::{extract_mod_record, parse_mod_page};
pub use markup::{Document, Node, Page};
pub use redirect::{LinkResolver, RedirectFollower, RedirectStrategy};
pub use search::{
    classify, extract_search_hits, extract_search_results, parse_search_hits, parse_search_page,
    ItemError, SearchHit,
};
pub use types::{Author, Link, ModRecord, RelatedMod, Relation, SearchItemData, SearchResultItem};
