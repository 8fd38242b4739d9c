//! Decoder types and traits
//!
//! Defines the core decoder abstractions.

use super::decoders::{JsonDecoder, JsonlDecoder};
use crate::error::Result;
use crate::types::Item;
use serde::{Deserialize, Serialize};

/// Format of the response body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecoderFormat {
    /// JSON format (default)
    #[default]
    Json,
    /// JSON Lines format (one JSON object per line)
    Jsonl,
}

/// Configuration for decoding responses
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Response format
    pub format: DecoderFormat,
    /// Dot path to the item array inside a JSON body
    pub records_path: Option<String>,
}

impl DecoderConfig {
    /// Create a JSON decoder config
    pub fn json() -> Self {
        Self::default()
    }

    /// Create a JSONL decoder config
    pub fn jsonl() -> Self {
        Self {
            format: DecoderFormat::Jsonl,
            records_path: None,
        }
    }

    /// Set the records path
    #[must_use]
    pub fn with_records_path(mut self, path: impl Into<String>) -> Self {
        self.records_path = Some(path.into());
        self
    }

    /// Build the decoder this config describes
    pub fn build(&self) -> Box<dyn RecordDecoder> {
        match self.format {
            DecoderFormat::Json => match &self.records_path {
                Some(path) => Box::new(JsonDecoder::with_path(path)),
                None => Box::new(JsonDecoder::new()),
            },
            DecoderFormat::Jsonl => Box::new(JsonlDecoder::new()),
        }
    }
}

/// Trait for decoding response bodies into items
pub trait RecordDecoder: Send + Sync {
    /// Decode the response body into a list of items
    fn decode(&self, body: &str) -> Result<Vec<Item>>;
}
