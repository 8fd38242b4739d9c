//! Page sources
//!
//! [`PageSource`] is the seam between the page cache and the transport.
//! The cache only needs three things from a response: whether the server
//! answered "not modified", the decoded items, and the `Link` header.

use crate::decode::RecordDecoder;
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::{Item, StringMap};
use async_trait::async_trait;
use reqwest::header::{ETAG, IF_NONE_MATCH, LINK};
use reqwest::StatusCode;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::Mutex;
use tracing::debug;

/// A successfully fetched page
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Decoded items, in server order
    pub items: Vec<Item>,
    /// Raw `Link` header value, if the server sent one
    pub link: Option<String>,
}

impl Page {
    /// Create a page from items and an optional link header
    pub fn new(items: Vec<Item>, link: Option<String>) -> Self {
        Self { items, link }
    }
}

/// Outcome of a page request that did not fail
#[derive(Debug, Clone, PartialEq)]
pub enum PageResponse {
    /// Fresh content
    Page(Page),
    /// The server reported the resource unchanged (304)
    NotModified,
}

impl PageResponse {
    /// Check if this is a not-modified response
    pub fn is_not_modified(&self) -> bool {
        matches!(self, Self::NotModified)
    }
}

/// Something that can fetch one page of a remote collection
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page described by `query`.
    ///
    /// `query` already contains the base parameters merged with
    /// `maxItems` and `skipCount`.
    async fn fetch(&self, query: &StringMap) -> Result<PageResponse>;
}

/// [`PageSource`] backed by [`HttpClient`]
pub struct HttpPageSource {
    client: HttpClient,
    endpoint: String,
    decoder: Box<dyn RecordDecoder>,
    conditional: bool,
    etags: Mutex<HashMap<String, String>>,
}

impl HttpPageSource {
    /// Create a source for an endpoint
    pub fn new(
        client: HttpClient,
        endpoint: impl Into<String>,
        decoder: Box<dyn RecordDecoder>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            decoder,
            conditional: false,
            etags: Mutex::new(HashMap::new()),
        }
    }

    /// Send `If-None-Match` with the last ETag seen for the same query
    #[must_use]
    pub fn with_conditional_requests(mut self, enabled: bool) -> Self {
        self.conditional = enabled;
        self
    }

    /// The collection endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Whether conditional requests are enabled
    pub fn is_conditional(&self) -> bool {
        self.conditional
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, query: &StringMap) -> Result<PageResponse> {
        let cache_key = query_key(query);
        let mut config = RequestConfig::new();
        config.query = query.clone();

        if self.conditional {
            if let Some(etag) = self.etags.lock().await.get(&cache_key) {
                config = config.header(IF_NONE_MATCH.as_str(), etag.as_str());
            }
        }

        let response = self.client.get(&self.endpoint, config).await?;
        let status = response.status();

        if status == StatusCode::NOT_MODIFIED {
            debug!("Not modified: {} ?{}", self.endpoint, cache_key);
            return Ok(PageResponse::NotModified);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::http_status(status.as_u16(), body));
        }

        let headers = response.headers();
        let link = header_string(headers, LINK.as_str());
        let etag = header_string(headers, ETAG.as_str());

        let body = response.text().await?;
        let items = self.decoder.decode(&body)?;

        if self.conditional {
            if let Some(etag) = etag {
                self.etags.lock().await.insert(cache_key, etag);
            }
        }

        debug!("Fetched {} items from {}", items.len(), self.endpoint);
        Ok(PageResponse::Page(Page::new(items, link)))
    }
}

impl std::fmt::Debug for HttpPageSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpPageSource")
            .field("endpoint", &self.endpoint)
            .field("conditional", &self.conditional)
            .finish_non_exhaustive()
    }
}

fn header_string(headers: &reqwest::header::HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}

/// Stable textual form of a query, independent of map ordering
fn query_key(query: &StringMap) -> String {
    query
        .iter()
        .collect::<BTreeMap<_, _>>()
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}
