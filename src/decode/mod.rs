//! Response decoder module
//!
//! Supports: JSON, JSONL
//!
//! Turns a page response body into the ordered item sequence the pager
//! caches. A JSON body is the item array itself unless a records path
//! points somewhere inside it.

mod decoders;
mod types;

pub use decoders::{JsonDecoder, JsonlDecoder};
pub use types::{DecoderConfig, DecoderFormat, RecordDecoder};

#[cfg(test)]
mod tests;
