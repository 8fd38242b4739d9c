//! Page cache
//!
//! A sparse index of pages keyed by 1-based page number, plus the derived
//! pagination state. Everything here is synchronous; the async fetch flow
//! lives in [`super::resource`] and feeds responses into this cache.

use super::key::PageKey;
use super::links::{parse_page_params, LinkMap, REL_FIRST, REL_LAST, REL_NEXT, REL_PREV};
use crate::error::{Error, Result};
use crate::types::Item;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// One page of the remote collection
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageEntry {
    /// URL the page can be fetched from, once discovered
    pub link: Option<String>,
    /// Items of the page, once fetched
    pub objects: Option<Vec<Item>>,
}

impl PageEntry {
    /// Create an entry that only knows its link
    pub fn with_link(link: impl Into<String>) -> Self {
        Self {
            link: Some(link.into()),
            objects: None,
        }
    }

    /// Whether this entry can be fetched
    pub fn is_fetchable(&self) -> bool {
        self.link.is_some()
    }

    /// Whether this entry holds materialized items
    pub fn is_materialized(&self) -> bool {
        self.objects.is_some()
    }
}

/// Position within the remote collection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaginationState {
    /// Total number of pages; 0 until a `last` link has been seen
    pub count_of_pages: u32,
    /// Page currently displayed; 0 before any fetch
    pub current_page_number: u32,
}

/// Sparse page number to entry mapping
#[derive(Debug, Clone, Default)]
pub struct PageIndex {
    pages: BTreeMap<u32, PageEntry>,
}

impl PageIndex {
    /// Create an empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the entry for a page
    pub fn get(&self, page: u32) -> Option<&PageEntry> {
        self.pages.get(&page)
    }

    /// Number of known pages
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether no page is known yet
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate entries in page order
    pub fn iter(&self) -> impl Iterator<Item = (u32, &PageEntry)> {
        self.pages.iter().map(|(page, entry)| (*page, entry))
    }

    /// Record a boundary (first/last) page.
    ///
    /// Replaces the existing entry only if there is none, it has no link,
    /// or `objects` is supplied. An entry holding items is never replaced
    /// by a link-only one. Returns whether the entry was written.
    pub fn merge_boundary(&mut self, page: u32, link: &str, objects: Option<Vec<Item>>) -> bool {
        let replace = match self.pages.get(&page) {
            None => true,
            Some(existing) => !existing.is_fetchable() || objects.is_some(),
        };
        if replace {
            self.pages.insert(
                page,
                PageEntry {
                    link: Some(link.to_string()),
                    objects,
                },
            );
        }
        replace
    }

    /// Record a neighbour (prev/next) link. An existing entry always wins.
    pub fn insert_link_if_absent(&mut self, page: u32, link: &str) -> bool {
        if self.pages.contains_key(&page) {
            return false;
        }
        self.pages.insert(page, PageEntry::with_link(link));
        true
    }

    /// Store freshly fetched items for a page, overwriting what was there
    pub fn store_objects(&mut self, page: u32, objects: Vec<Item>) {
        self.pages.entry(page).or_default().objects = Some(objects);
    }
}

/// Page index, pagination state and the currently displayed items
#[derive(Debug, Clone, Default)]
pub struct PageCache {
    index: PageIndex,
    state: PaginationState,
    current_items: Vec<Item>,
}

impl PageCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Current pagination state
    pub fn state(&self) -> PaginationState {
        self.state
    }

    /// Items of the current page
    pub fn current_items(&self) -> &[Item] {
        &self.current_items
    }

    /// The page index
    pub fn index(&self) -> &PageIndex {
        &self.index
    }

    /// Resolve a navigation key to a page number
    pub fn resolve(&self, key: PageKey) -> u32 {
        key.resolve(self.state.current_page_number, self.state.count_of_pages)
    }

    /// Link of a page, or a navigation error if none is known
    pub fn link_for(&self, page: u32) -> Result<&str> {
        self.index
            .get(page)
            .and_then(|entry| entry.link.as_deref())
            .ok_or_else(|| Error::navigation(page))
    }

    /// Apply a fresh first-page response
    pub fn record_first_page(&mut self, items: Vec<Item>, links: &LinkMap) {
        self.state.current_page_number = 1;
        self.apply_links(links, &items);
        self.current_items = items;
    }

    /// Apply a fresh response for `page`
    pub fn record_page(&mut self, page: u32, items: Vec<Item>, links: &LinkMap) {
        self.state.current_page_number = page;
        self.apply_links(links, &items);
        self.index.store_objects(page, items);
        self.rebuild_current();
    }

    /// Serve `page` from the cache after a not-modified response
    pub fn record_not_modified(&mut self, page: u32) {
        self.state.current_page_number = page;
        self.rebuild_current();
    }

    /// Link bookkeeping for one response, relative to the current page
    pub fn apply_links(&mut self, links: &LinkMap, items: &[Item]) {
        let current = self.state.current_page_number;

        if let Some(link) = links.get(REL_FIRST) {
            let objects = (current == 1).then(|| items.to_vec());
            self.index.merge_boundary(1, link, objects);
        }

        if let Some(link) = links.get(REL_LAST) {
            match parse_page_params(link).page_number() {
                Some(count) => {
                    self.state.count_of_pages = count;
                    let objects = (current == count).then(|| items.to_vec());
                    self.index.merge_boundary(count, link, objects);
                }
                None => warn!("Ignoring last link without a usable page number: {}", link),
            }
        }

        if let Some(link) = links.get(REL_PREV) {
            if let Some(prev) = current.checked_sub(1).filter(|p| *p > 0) {
                self.index.insert_link_if_absent(prev, link);
            }
        }

        if let Some(link) = links.get(REL_NEXT) {
            match current.checked_add(1) {
                Some(next) => {
                    self.index.insert_link_if_absent(next, link);
                }
                None => warn!("Ignoring next link past page {}: {}", current, link),
            }
        }

        debug!(
            "Page {}/{}: {} pages indexed",
            current,
            self.state.count_of_pages,
            self.index.len()
        );
    }

    fn rebuild_current(&mut self) {
        self.current_items = self
            .index
            .get(self.state.current_page_number)
            .and_then(|entry| entry.objects.clone())
            .unwrap_or_default();
    }
}
