//! CLI module
//!
//! Command-line interface for browsing a paged collection.
//!
//! # Commands
//!
//! - `fetch` - Fetch page 1 and follow navigation keys
//! - `validate` - Check a collection config
//! - `links` - Decode a `Link` header value

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{page_message, Runner};
