// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Search results page extraction
//!
//! Items are independent: an item that cannot be read is logged and left
//! out, and the rest of the page is still returned.

use thiserror::Error;
use tracing::warn;

use super::markup::{Document, Node, Page};
use super::redirect::LinkResolver;
use super::types::{SearchItemData, SearchResultItem};

const DETAIL_PATHS: [&str; 2] = ["mcmod.cn/class/", "mcmod.cn/modpack/"];
const CATEGORY_PREFIX: &str = "//www.mcmod.cn/class/category/";
const CATEGORY_SUFFIX: &str = "-1.html";

/// Why a single result item was left out
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("result item has no address link")]
    MissingAddress,
}

/// A result item before it is classified
///
/// Classification depends on the final address, so callers that resolve
/// addresses over the network do so on hits and classify afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub address: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub snapshot_time: Option<String>,
    /// `href` of the item's first link; the category icon on mod hits
    pub lead_href: Option<String>,
}

impl SearchHit {
    /// Classify by address and derive the nested `data` record
    pub fn into_item(self) -> SearchResultItem {
        let data = if is_detail_address(&self.address) {
            detail_data(&self.address, self.title.as_deref(), self.lead_href.as_deref())
        } else {
            SearchItemData::default()
        };

        SearchResultItem {
            address: self.address,
            title: self.title,
            description: self.description,
            snapshot_time: self.snapshot_time,
            data,
        }
    }
}

/// Parse raw search page markup
pub fn parse_search_page(html: &str, links: &LinkResolver) -> Vec<SearchResultItem> {
    classify(parse_search_hits(html, links))
}

/// Parse raw search page markup without classifying the hits
pub fn parse_search_hits(html: &str, links: &LinkResolver) -> Vec<SearchHit> {
    let page = Page::parse(html);
    extract_search_hits(&page, links)
}

/// Results in document order; empty when the page has no result list
pub fn extract_search_results<D: Document>(doc: &D, links: &LinkResolver) -> Vec<SearchResultItem> {
    classify(extract_search_hits(doc, links))
}

pub fn extract_search_hits<D: Document>(doc: &D, links: &LinkResolver) -> Vec<SearchHit> {
    let root = doc.root();
    let Some(list) = root.select_first("div.search-result-list") else {
        return Vec::new();
    };

    let mut hits = Vec::new();
    for (index, item) in list.select_all("div.result-item").iter().enumerate() {
        match extract_hit(item, links) {
            Ok(hit) => hits.push(hit),
            Err(e) => warn!("Skipping search result item {}: {}", index, e),
        }
    }

    hits
}

pub fn classify(hits: Vec<SearchHit>) -> Vec<SearchResultItem> {
    hits.into_iter().map(SearchHit::into_item).collect()
}

fn extract_hit<N: Node>(item: &N, links: &LinkResolver) -> Result<SearchHit, ItemError> {
    let href = item
        .select_first("span.info")
        .and_then(|info| info.select_first("a"))
        .and_then(|a| a.attr("href").map(str::to_string))
        .filter(|href| !href.is_empty())
        .ok_or(ItemError::MissingAddress)?;

    // A missing second info span leaves the snapshot time unset
    let snapshot_time = item
        .select_all("span.info")
        .get(1)
        .and_then(|info| info.select_first("span.value"))
        .map(|n| n.trimmed_text());

    Ok(SearchHit {
        address: links.resolve(&href),
        title: item.select_first("div.head").map(|n| n.trimmed_text()),
        description: item.select_first("div.body").map(|n| n.trimmed_text()),
        snapshot_time,
        lead_href: item
            .select_first("a")
            .and_then(|a| a.attr("href").map(str::to_string)),
    })
}

/// True for mod and modpack pages
pub fn is_detail_address(address: &str) -> bool {
    DETAIL_PATHS.iter().any(|path| address.contains(path))
}

fn detail_data(address: &str, title: Option<&str>, lead_href: Option<&str>) -> SearchItemData {
    let mcmod_id = address
        .rsplit('/')
        .next()
        .map(|segment| segment.replace(".html", ""));

    let (abbr, chinese_name, sub_name) = match title {
        Some(title) => {
            let parts = split_title(title);
            (parts.abbr, Some(parts.name), parts.sub_name)
        }
        None => (None, None, None),
    };

    SearchItemData {
        mcmod_id,
        abbr,
        chinese_name,
        sub_name,
        category: lead_href.and_then(category_from_href),
    }
}

#[derive(Debug, PartialEq, Eq)]
struct TitleParts {
    abbr: Option<String>,
    name: String,
    sub_name: Option<String>,
}

/// `[ABBR] name (alt)` → abbreviation, name, alternate name
fn split_title(title: &str) -> TitleParts {
    let (abbr, rest) = match title
        .strip_prefix('[')
        .and_then(|inner| inner.split_once("] "))
    {
        Some((abbr, rest)) => (Some(abbr.to_string()), rest),
        None => (None, title),
    };

    match rest.split_once(" (") {
        Some((name, alt)) => {
            let alt = alt.rsplit_once(')').map(|(inner, _)| inner).unwrap_or(alt);
            TitleParts {
                abbr,
                name: name.to_string(),
                sub_name: Some(alt.to_string()),
            }
        }
        None => TitleParts {
            abbr,
            name: rest.to_string(),
            sub_name: None,
        },
    }
}

fn category_from_href(href: &str) -> Option<String> {
    if !href.contains("category") {
        return None;
    }

    let relative = href
        .strip_prefix("https:")
        .or_else(|| href.strip_prefix("http:"))
        .unwrap_or(href);

    Some(
        relative
            .replace(CATEGORY_PREFIX, "")
            .replace(CATEGORY_SUFFIX, ""),
    )
}
