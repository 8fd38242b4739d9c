// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # remote-pager
//!
//! A client for remote collections that are paged through RFC 5988 `Link`
//! headers with offset parameters (`skipCount`, `maxItems`).
//!
//! ## Features
//!
//! - **Link Discovery**: Learns page boundaries from `first`/`prev`/`next`/`last` links
//! - **Sparse Page Cache**: Caches pages by number, never discarding fetched items
//! - **Relative and Absolute Navigation**: `first`, `prev`, `next`, `last` or a page number
//! - **Conditional Requests**: Serves cached items when the server answers 304
//! - **Robust HTTP**: Retries, backoff, rate limiting and credentials
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use remote_pager::{PagerConfig, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = PagerConfig::new("https://example.com/api/organization");
//!     let mut organizations = config.build_resource()?.with_param("userId", "user123");
//!
//!     let first = organizations.fetch_first_page(Some(10)).await?;
//!     println!("{} organizations on page 1", first.len());
//!
//!     organizations.fetch_page("next").await?;
//!     let state = organizations.pagination_state();
//!     println!("page {}/{}", state.current_page_number, state.count_of_pages);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      PagingResource                         │
//! │  fetch_first_page()  fetch_page(key)  pagination_state()    │
//! └─────────────────────────────────────────────────────────────┘
//!          │                     │                     │
//! ┌────────┴───────┬─────────────┴──────┬──────────────┴───────┐
//! │   Page Cache   │    Link Parser     │     PageSource       │
//! ├────────────────┼────────────────────┼──────────────────────┤
//! │ Sparse index   │ Link header        │ HttpPageSource       │
//! │ Non-downgrade  │ skipCount/maxItems │ Retry / Rate limit   │
//! │ Page count     │                    │ ETag / 304           │
//! └────────────────┴────────────────────┴──────────────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// HTTP client with retry and rate limiting
pub mod http;

/// Response decoders (JSON, JSONL)
pub mod decode;

/// Paged collection client
pub mod pagination;

/// Collection configuration
pub mod config;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use config::PagerConfig;
pub use error::{Error, Result};
pub use pagination::{PageKey, PagingResource, PaginationState};
pub use types::*;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
