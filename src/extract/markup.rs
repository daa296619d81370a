// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! HTML query layer
//!
//! Extractors only ever ask two questions of a page: "first element matching
//! this selector" and "every element matching this selector". Keeping them
//! behind [`Node`] and [`Document`] lets the extraction rules stay declarative
//! while `scraper` does the parsing.

use scraper::{ElementRef, Html, Selector};

/// An element that can be queried with CSS selectors
pub trait Node: Sized {
    /// First descendant matching `css`, in document order
    fn select_first(&self, css: &str) -> Option<Self>;

    /// Every descendant matching `css`, in document order
    fn select_all(&self, css: &str) -> Vec<Self>;

    /// Tag name, lowercase
    fn name(&self) -> &str;

    /// Concatenated text of this element and its descendants
    fn text(&self) -> String;

    fn attr(&self, name: &str) -> Option<&str>;

    fn trimmed_text(&self) -> String {
        self.text().trim().to_string()
    }
}

/// A parsed page: a queryable root plus the raw markup it came from
pub trait Document {
    type Node<'a>: Node
    where
        Self: 'a;

    fn root(&self) -> Self::Node<'_>;

    /// Raw markup, for the few fields matched literally rather than structurally
    fn source(&self) -> &str;
}

/// `scraper`-backed [`Document`]
pub struct Page {
    html: Html,
    source: String,
}

impl Page {
    pub fn parse(source: &str) -> Self {
        Self {
            html: Html::parse_document(source),
            source: source.to_string(),
        }
    }
}

impl Document for Page {
    type Node<'a> = ElementRef<'a>;

    fn root(&self) -> ElementRef<'_> {
        self.html.root_element()
    }

    fn source(&self) -> &str {
        &self.source
    }
}

/// Unparsable selectors match nothing
fn selector(css: &str) -> Option<Selector> {
    Selector::parse(css).ok()
}

impl<'a> Node for ElementRef<'a> {
    fn select_first(&self, css: &str) -> Option<Self> {
        let selector = selector(css)?;
        let scope = self.id();
        self.select(&selector).find(|el| el.id() != scope)
    }

    fn select_all(&self, css: &str) -> Vec<Self> {
        let Some(selector) = selector(css) else {
            return Vec::new();
        };
        let scope = self.id();
        self.select(&selector).filter(|el| el.id() != scope).collect()
    }

    fn name(&self) -> &str {
        self.value().name()
    }

    fn text(&self) -> String {
        ElementRef::text(self).collect()
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.value().attr(name)
    }
}
