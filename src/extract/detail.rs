// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Mod / modpack detail page extraction
//!
//! Every field is looked up independently. A missing element yields `None`
//! or an empty collection for that field and never affects the others.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

use super::markup::{Document, Node, Page};
use super::redirect::LinkResolver;
use super::types::{Author, Link, ModRecord, RelatedMod, Relation};

const UNKNOWN_CATEGORY: &str = "未知分类";
const UNKNOWN_RELATION: &str = "未知关系";
const TOOLTIP_ATTR: &str = "data-original-title";

// The runtime-environment cell sits in the info grid without a class of its
// own, so it is matched on the literal markup.
static OPERATING_ENV_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<li class="col-lg-4">运行环境:\s*(.*?)</li>"#).expect("valid regex")
});

static TIMESTAMP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2})").expect("valid regex")
});

static EDIT_COUNT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)次").expect("valid regex"));

/// Parse raw detail page markup
pub fn parse_mod_page(html: &str, links: &LinkResolver) -> ModRecord {
    let page = Page::parse(html);
    extract_mod_record(&page, links)
}

/// Build a [`ModRecord`] from an already parsed page
pub fn extract_mod_record<D: Document>(doc: &D, links: &LinkResolver) -> ModRecord {
    let root = doc.root();
    let info = info_cells(&root);

    ModRecord {
        title: root.select_first("h3").map(|n| n.trimmed_text()),
        subtitle: root.select_first("h4").map(|n| n.trimmed_text()),
        cover_image: cover_image(&root, links),
        supported_versions: supported_versions(&root),
        related_links: related_links(&root, links),
        operating_environment: operating_environment(doc.source()),
        tag_links: tag_links(&root),
        short_name: root.select_first("span.short-name").map(|n| n.trimmed_text()),
        recorded_time: info.recorded_time,
        last_edit_time: info.last_edit_time,
        last_recommend_time: info.last_recommend_time,
        edit_count: info.edit_count,
        authors: authors(&root),
        mod_relations: mod_relations(&root),
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn cover_image<N: Node>(root: &N, links: &LinkResolver) -> Option<String> {
    let src = root
        .select_first("div.class-cover-image")?
        .select_first("img")?
        .attr("src")?
        .to_string();

    if src.starts_with("//") {
        Some(links.resolve(&src))
    } else {
        Some(src)
    }
}

/// Loader headings ("Forge:") open a group; links that follow append to it.
/// Links seen before any heading, or after a heading with an empty loader
/// name, have no group and are dropped.
fn supported_versions<N: Node>(root: &N) -> IndexMap<String, Vec<String>> {
    let mut versions: IndexMap<String, Vec<String>> = IndexMap::new();
    let Some(section) = root.select_first("li.col-lg-12.mcver") else {
        return versions;
    };

    let mut current: Option<String> = None;
    for node in section.select_all("li, a") {
        match node.name() {
            "li" => {
                let text = node.trimmed_text();
                if let Some(loader) = text.strip_suffix(':') {
                    versions.insert(loader.to_string(), Vec::new());
                    current = Some(loader.to_string()).filter(|l| !l.is_empty());
                }
            }
            "a" => {
                if let Some(group) = current.as_ref().and_then(|l| versions.get_mut(l)) {
                    group.push(node.trimmed_text());
                }
            }
            _ => {}
        }
    }

    versions
}

fn mod_relations<N: Node>(root: &N) -> IndexMap<String, Vec<Relation>> {
    let mut relations = IndexMap::new();
    let Some(list) = root.select_first("ul.class-relation-list") else {
        return relations;
    };

    for fieldset in list.select_all("fieldset") {
        let category = fieldset
            .select_first("legend")
            .map(|n| n.trimmed_text())
            .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string());

        let mut entries = Vec::new();
        for item in fieldset.select_all("li.relation") {
            let relation_type = item
                .select_first("span")
                .map(|n| n.trimmed_text())
                .unwrap_or_else(|| UNKNOWN_RELATION.to_string());

            let mods: Vec<RelatedMod> = item
                .select_all("a")
                .iter()
                .filter_map(|a| {
                    let name = non_empty(a.trimmed_text())?;
                    let link = non_empty(a.attr("href")?.to_string())?;
                    Some(RelatedMod { name, link })
                })
                .collect();

            if !mods.is_empty() {
                entries.push(Relation {
                    relation_type,
                    mods,
                });
            }
        }

        relations.insert(category, entries);
    }

    relations
}

/// Tooltip text wins over the visible label
fn related_links<N: Node>(root: &N, links: &LinkResolver) -> Vec<Link> {
    let Some(frame) = root.select_first("div.common-link-frame") else {
        return Vec::new();
    };

    frame
        .select_all("a")
        .iter()
        .map(|a| {
            let text = a
                .attr(TOOLTIP_ATTR)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| a.trimmed_text());
            let url = a.attr("href").map(|href| {
                if href.starts_with("//") {
                    links.resolve(href)
                } else {
                    href.to_string()
                }
            });
            Link { text, url }
        })
        .collect()
}

fn operating_environment(source: &str) -> Option<String> {
    OPERATING_ENV_RE
        .captures(source)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn tag_links<N: Node>(root: &N) -> Vec<Link> {
    let Some(section) = root.select_first("li.col-lg-12.tag") else {
        return Vec::new();
    };

    section
        .select_all("a")
        .iter()
        .filter_map(|a| {
            let url = non_empty(a.attr("href")?.to_string())?;
            Some(Link {
                text: a.trimmed_text(),
                url: Some(url),
            })
        })
        .collect()
}

/// Entries without a link or a name are skipped
fn authors<N: Node>(root: &N) -> Vec<Author> {
    let Some(section) = root.select_first("li.col-lg-12.author") else {
        return Vec::new();
    };

    section
        .select_all("li")
        .iter()
        .filter_map(|item| {
            let link = item
                .select_first("a")
                .and_then(|a| a.attr("href").map(str::to_string))
                .and_then(non_empty)?;
            let name = item
                .select_first("span.name")
                .map(|n| n.trimmed_text())
                .and_then(non_empty)?;
            let position = item
                .select_first("span.position")
                .map(|n| n.trimmed_text());

            Some(Author {
                name,
                link,
                position,
            })
        })
        .collect()
}

#[derive(Debug, Default)]
struct InfoCells {
    recorded_time: Option<String>,
    last_edit_time: Option<String>,
    last_recommend_time: Option<String>,
    edit_count: Option<String>,
}

fn timestamp(tooltip: &str) -> Option<String> {
    TIMESTAMP_RE
        .captures(tooltip)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Cells are classified by their visible label; the exact time lives in the
/// tooltip. A later cell with the same label overwrites an earlier one.
fn info_cells<N: Node>(root: &N) -> InfoCells {
    let mut info = InfoCells::default();

    for cell in root.select_all("li.col-lg-4") {
        let text = cell.trimmed_text();
        let tooltip = cell.attr(TOOLTIP_ATTR).unwrap_or("");

        if text.contains("收录时间") {
            info.recorded_time = timestamp(tooltip);
        } else if text.contains("最后编辑") {
            info.last_edit_time = timestamp(tooltip);
        } else if text.contains("最后推荐") {
            info.last_recommend_time = timestamp(tooltip);
        } else if text.contains("编辑次数") {
            if let Some(caps) = EDIT_COUNT_RE.captures(&text) {
                info.edit_count = caps.get(1).map(|m| m.as_str().to_string());
            }
        }
    }

    info
}
