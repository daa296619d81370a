// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Structured records produced by the page extractors
//!
//! Optional values always serialise as `null` so consumers see a stable shape.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A `{text, url}` pair taken from an anchor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub text: String,
    pub url: Option<String>,
}

/// One entry of the author section on a detail page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub name: String,
    pub link: String,
    pub position: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedMod {
    pub name: String,
    pub link: String,
}

/// A typed relation ("depends on", "incompatible with", ...) and the mods it names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    pub relation_type: String,
    pub mods: Vec<RelatedMod>,
}

/// Mod or modpack detail page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModRecord {
    pub title: Option<String>,
    pub subtitle: Option<String>,
    pub cover_image: Option<String>,
    /// Loader name → versions, in document order
    pub supported_versions: IndexMap<String, Vec<String>>,
    pub related_links: Vec<Link>,
    pub operating_environment: Option<String>,
    pub tag_links: Vec<Link>,
    pub short_name: Option<String>,
    pub recorded_time: Option<String>,
    pub last_edit_time: Option<String>,
    pub last_recommend_time: Option<String>,
    pub edit_count: Option<String>,
    pub authors: Vec<Author>,
    /// Relation category → relations, in document order
    pub mod_relations: IndexMap<String, Vec<Relation>>,
}

/// Fields derived from a search hit that points at a mod or modpack page
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItemData {
    pub mcmod_id: Option<String>,
    pub abbr: Option<String>,
    pub chinese_name: Option<String>,
    pub sub_name: Option<String>,
    pub category: Option<String>,
}

/// One hit on a search results page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultItem {
    pub address: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub snapshot_time: Option<String>,
    pub data: SearchItemData,
}

impl SearchResultItem {
    /// True when `data` carries no detail, i.e. the hit is not a mod/modpack page
    pub fn is_bare(&self) -> bool {
        self.data == SearchItemData::default()
    }
}
