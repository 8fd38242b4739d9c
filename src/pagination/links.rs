//! Link header parsing (RFC 5988)
//!
//! Two stateless helpers: one decodes relation-tagged URLs out of a
//! `Link` header value, the other harvests the offset paging parameters
//! the server already encoded into a link's query string.

use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::num::IntErrorKind;
use std::sync::LazyLock;
use tracing::warn;

/// Relation name of the first page link
pub const REL_FIRST: &str = "first";
/// Relation name of the previous page link
pub const REL_PREV: &str = "prev";
/// Relation name of the next page link
pub const REL_NEXT: &str = "next";
/// Relation name of the last page link
pub const REL_LAST: &str = "last";

/// Query parameter carrying the page size
pub const MAX_ITEMS_PARAM: &str = "maxItems";
/// Query parameter carrying the zero-based offset
pub const SKIP_COUNT_PARAM: &str = "skipCount";

// `<url>; rel="name"` entries, in any separator arrangement
static LINK_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([^>]+?)>.+?rel="([^"]+?)""#).expect("Invalid link regex")
});

static PARAM_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([_\w]+)=(\w+)").expect("Invalid param regex"));

/// Relation name to URL, as decoded from one `Link` header
pub type LinkMap = HashMap<String, String>;

/// Decode a `Link` header value into a relation map.
///
/// Absent or unmatched input yields an empty map. URLs are passed through
/// verbatim; a relation that appears twice keeps its last URL.
pub fn parse_links(header: Option<&str>) -> LinkMap {
    let mut links = LinkMap::new();
    let Some(header) = header else {
        return links;
    };

    for captures in LINK_REGEX.captures_iter(header) {
        links.insert(captures[2].to_string(), captures[1].to_string());
    }

    links
}

/// Position and size of one page in the remote collection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageParams {
    /// Page size
    pub max_items: u64,
    /// Zero-based offset of the page's first item
    pub skip_count: u64,
}

impl PageParams {
    /// Create page parameters
    pub fn new(max_items: u64, skip_count: u64) -> Self {
        Self {
            max_items,
            skip_count,
        }
    }

    /// Page number these parameters describe.
    ///
    /// Skip counts are zero-based multiples of the page size, so
    /// `skipCount=40&maxItems=10` is page 5. `None` when the page size is
    /// 0 or the page number does not fit a `u32`.
    pub fn page_number(&self) -> Option<u32> {
        if self.max_items == 0 {
            return None;
        }
        (self.skip_count / self.max_items)
            .checked_add(1)
            .and_then(|page| u32::try_from(page).ok())
    }

    /// Merge these parameters into a base query, leaving other keys untouched
    pub fn apply_to(&self, query: &mut HashMap<String, String>) {
        query.insert(MAX_ITEMS_PARAM.to_string(), self.max_items.to_string());
        query.insert(SKIP_COUNT_PARAM.to_string(), self.skip_count.to_string());
    }
}

impl fmt::Display for PageParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{SKIP_COUNT_PARAM}={}&{MAX_ITEMS_PARAM}={}",
            self.skip_count, self.max_items
        )
    }
}

/// Extract `maxItems` and `skipCount` from a link URL.
///
/// Missing or non-numeric values default to 0. Digit strings too large
/// for a `u64` saturate, so they never read as a small page.
pub fn parse_page_params(url: &str) -> PageParams {
    let params: HashMap<&str, &str> = PARAM_REGEX
        .captures_iter(url)
        .filter_map(|c| Some((c.get(1)?.as_str(), c.get(2)?.as_str())))
        .collect();

    let numeric = |key: &str| match params.get(key).map(|v| v.parse::<u64>()) {
        Some(Ok(value)) => value,
        Some(Err(e)) if *e.kind() == IntErrorKind::PosOverflow => {
            warn!("{} out of range in {}, saturating", key, url);
            u64::MAX
        }
        _ => 0,
    };

    PageParams {
        max_items: numeric(MAX_ITEMS_PARAM),
        skip_count: numeric(SKIP_COUNT_PARAM),
    }
}
