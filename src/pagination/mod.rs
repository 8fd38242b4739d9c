//! Pagination module
//!
//! Client for remote collections paged through RFC 5988 `Link` headers.
//!
//! # Overview
//!
//! A [`PagingResource`] fetches pages from a [`PageSource`], decodes the
//! `first`/`prev`/`next`/`last` links of every response, and keeps a sparse
//! [`PageIndex`] of discovered pages. Navigation resolves a [`PageKey`] to a
//! page number and follows the cached link for it. A not-modified response
//! is served from the cache.

mod cache;
mod key;
mod links;
mod resource;
mod source;

pub use cache::{PageCache, PageEntry, PageIndex, PaginationState};
pub use key::PageKey;
pub use links::{
    parse_links, parse_page_params, LinkMap, PageParams, MAX_ITEMS_PARAM, REL_FIRST, REL_LAST,
    REL_NEXT, REL_PREV, SKIP_COUNT_PARAM,
};
pub use resource::{PagingResource, DEFAULT_PAGE_SIZE};
pub use source::{HttpPageSource, Page, PageResponse, PageSource};
