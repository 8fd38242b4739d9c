//! Paged remote collection
//!
//! [`PagingResource`] drives a [`PageSource`] and keeps a [`PageCache`]
//! coherent with what the server reported. One instance manages exactly
//! one remote collection.
//!
//! All mutating calls take `&mut self`, so two navigations can never be in
//! flight on the same instance. Hosts that share an instance across tasks
//! wrap it in a `tokio::sync::Mutex`.

use super::cache::{PageCache, PageIndex, PaginationState};
use super::key::PageKey;
use super::links::{parse_links, parse_page_params, PageParams};
use super::source::{PageResponse, PageSource};
use crate::error::Result;
use crate::types::{Item, StringMap};
use tracing::debug;

/// Page size used until the caller asks for another one
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Client for one paginated remote collection
#[derive(Debug)]
pub struct PagingResource<S> {
    source: S,
    base_params: StringMap,
    params: PageParams,
    cache: PageCache,
}

impl<S: PageSource> PagingResource<S> {
    /// Create a resource with no extra query parameters
    pub fn new(source: S) -> Self {
        Self {
            source,
            base_params: StringMap::new(),
            params: PageParams::new(u64::from(DEFAULT_PAGE_SIZE), 0),
            cache: PageCache::new(),
        }
    }

    /// Set the base query parameters (filters such as an owner id).
    ///
    /// These are sent with every request and survive navigation.
    #[must_use]
    pub fn with_params(mut self, params: StringMap) -> Self {
        self.base_params = params;
        self
    }

    /// Add a single base query parameter
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.base_params.insert(key.into(), value.into());
        self
    }

    /// Set the default page size
    #[must_use]
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.params.max_items = u64::from(page_size);
        self
    }

    /// Fetch page 1 afresh.
    ///
    /// `page_size` replaces the current page size when given. On a
    /// not-modified response the cached items are returned untouched.
    pub async fn fetch_first_page(&mut self, page_size: Option<u32>) -> Result<&[Item]> {
        let mut params = self.params;
        if let Some(size) = page_size {
            params.max_items = u64::from(size);
        }
        params.skip_count = 0;

        let response = self.source.fetch(&self.query_for(params)).await?;
        self.params = params;

        match response {
            PageResponse::Page(page) => {
                let links = parse_links(page.link.as_deref());
                self.cache.record_first_page(page.items, &links);
            }
            PageResponse::NotModified => {
                debug!("First page not modified, serving cached items");
            }
        }

        Ok(self.cache.current_items())
    }

    /// Navigate by a textual key: `first`, `prev`, `next`, `last` or a page number
    pub async fn fetch_page(&mut self, key: &str) -> Result<&[Item]> {
        let key: PageKey = key.parse()?;
        self.navigate(key).await
    }

    /// Navigate to the page `key` resolves to.
    ///
    /// Fails with a navigation error when no link is known for that page.
    /// Nothing is changed when the request fails.
    pub async fn navigate(&mut self, key: PageKey) -> Result<&[Item]> {
        let page = self.cache.resolve(key);
        let params = parse_page_params(self.cache.link_for(page)?);
        debug!("Navigating '{}' to page {} ({})", key, page, params);

        let response = self.source.fetch(&self.query_for(params)).await?;
        self.params = params;

        match response {
            PageResponse::Page(fetched) => {
                let links = parse_links(fetched.link.as_deref());
                self.cache.record_page(page, fetched.items, &links);
            }
            PageResponse::NotModified => {
                debug!("Page {} not modified, serving cached items", page);
                self.cache.record_not_modified(page);
            }
        }

        Ok(self.cache.current_items())
    }

    /// Current page number and page count
    pub fn pagination_state(&self) -> PaginationState {
        self.cache.state()
    }

    /// Items of the current page
    pub fn current_items(&self) -> &[Item] {
        self.cache.current_items()
    }

    /// Known pages
    pub fn page_index(&self) -> &PageIndex {
        self.cache.index()
    }

    /// Parameters of the last accepted request
    pub fn request_params(&self) -> PageParams {
        self.params
    }

    /// Base query parameters
    pub fn base_params(&self) -> &StringMap {
        &self.base_params
    }

    /// The underlying page source
    pub fn source(&self) -> &S {
        &self.source
    }

    fn query_for(&self, params: PageParams) -> StringMap {
        let mut query = self.base_params.clone();
        params.apply_to(&mut query);
        query
    }
}
