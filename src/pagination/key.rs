//! Navigation keys

use super::links::{REL_FIRST, REL_LAST, REL_NEXT, REL_PREV};
use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Where a navigation call should go
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKey {
    /// Page 1
    First,
    /// One page back, stopping at page 1
    Prev,
    /// One page forward, stopping at the last known page
    Next,
    /// The last page, as derived from the `last` link
    Last,
    /// An absolute 1-based page number
    Number(u32),
}

impl PageKey {
    /// Resolve this key against the current position and page count
    pub fn resolve(self, current_page: u32, count_of_pages: u32) -> u32 {
        match self {
            PageKey::First => 1,
            PageKey::Prev => {
                if current_page > 1 {
                    current_page - 1
                } else {
                    1
                }
            }
            PageKey::Next => {
                if current_page < count_of_pages {
                    current_page + 1
                } else {
                    current_page
                }
            }
            PageKey::Last => count_of_pages,
            PageKey::Number(n) => n,
        }
    }
}

impl FromStr for PageKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim();
        match key {
            REL_FIRST => Ok(PageKey::First),
            REL_PREV => Ok(PageKey::Prev),
            REL_NEXT => Ok(PageKey::Next),
            REL_LAST => Ok(PageKey::Last),
            _ => key
                .parse::<u32>()
                .map(PageKey::Number)
                .map_err(|_| Error::invalid_page_key(s)),
        }
    }
}

impl From<u32> for PageKey {
    fn from(page: u32) -> Self {
        PageKey::Number(page)
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageKey::First => f.write_str(REL_FIRST),
            PageKey::Prev => f.write_str(REL_PREV),
            PageKey::Next => f.write_str(REL_NEXT),
            PageKey::Last => f.write_str(REL_LAST),
            PageKey::Number(n) => write!(f, "{n}"),
        }
    }
}
