//! HTTP client module
//!
//! The transport collaborator of the pager: retries, rate limiting and
//! credentials live here so the page cache never sees them.
//!
//! # Features
//!
//! - **Automatic Retries**: Configurable retry logic with backoff
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Backoff Strategies**: Constant, linear, and exponential backoff
//! - **Authentication**: Bearer and basic credentials

mod client;
mod rate_limit;

pub use client::{HttpAuth, HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};
