//! Configuration for a paged collection
//!
//! A [`PagerConfig`] describes one remote collection endpoint and the HTTP
//! settings used to reach it. Files are YAML; JSON is accepted as well.
//!
//! ```yaml
//! endpoint: https://example.com/api/organization
//! page_size: 10
//! params:
//!   userId: user123
//! conditional_requests: true
//! auth:
//!   type: bearer
//!   token: secret
//! http:
//!   timeout_secs: 10
//!   max_retries: 2
//! ```

use crate::decode::{DecoderConfig, DecoderFormat};
use crate::error::{Error, Result};
use crate::http::{HttpAuth, HttpClient, HttpClientConfig, RateLimiterConfig};
use crate::pagination::{
    HttpPageSource, PagingResource, DEFAULT_PAGE_SIZE, MAX_ITEMS_PARAM, SKIP_COUNT_PARAM,
};
use crate::types::{BackoffType, OptionStringExt, StringMap};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;
use url::Url;

// ============================================================================
// Top-Level Config
// ============================================================================

/// Complete configuration of one paged collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PagerConfig {
    /// Collection endpoint URL
    pub endpoint: String,

    /// Page size for the first fetch
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Base query parameters, preserved across navigation
    #[serde(default)]
    pub params: StringMap,

    /// Response body format
    #[serde(default)]
    pub format: DecoderFormat,

    /// Dot path to the item array inside the response body
    #[serde(default)]
    pub records_path: Option<String>,

    /// Send `If-None-Match` with previously seen ETags
    #[serde(default)]
    pub conditional_requests: bool,

    /// Credentials
    #[serde(default)]
    pub auth: Option<HttpAuth>,

    /// HTTP client settings
    #[serde(default)]
    pub http: HttpSettings,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

// ============================================================================
// HTTP Settings
// ============================================================================

/// HTTP client settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum number of retries
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Backoff strategy
    #[serde(default)]
    pub backoff: BackoffType,

    /// Initial backoff in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum backoff in milliseconds
    #[serde(default = "default_max_backoff_ms")]
    pub max_backoff_ms: u64,

    /// Rate limit; unlimited when absent
    #[serde(default)]
    pub rate_limit: Option<RateLimiterConfig>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_retries() -> u32 {
    3
}

fn default_initial_backoff_ms() -> u64 {
    100
}

fn default_max_backoff_ms() -> u64 {
    60_000
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            max_retries: default_max_retries(),
            backoff: BackoffType::default(),
            initial_backoff_ms: default_initial_backoff_ms(),
            max_backoff_ms: default_max_backoff_ms(),
            rate_limit: None,
            headers: StringMap::new(),
            user_agent: None,
        }
    }
}

// ============================================================================
// Loading and Conversion
// ============================================================================

impl PagerConfig {
    /// Create a config for an endpoint with default settings
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            page_size: default_page_size(),
            params: StringMap::new(),
            format: DecoderFormat::default(),
            records_path: None,
            conditional_requests: false,
            auth: None,
            http: HttpSettings::default(),
        }
    }

    /// Parse and validate a config from YAML (or JSON) text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::FileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                Error::Io(e)
            }
        })?;
        Self::parse(&content)
    }

    /// Check the config for values the pager cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(Error::missing_field("endpoint"));
        }
        let url = Url::parse(&self.endpoint)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_value(
                "endpoint",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be greater than 0"));
        }
        for reserved in [MAX_ITEMS_PARAM, SKIP_COUNT_PARAM] {
            if self.params.contains_key(reserved) {
                return Err(Error::invalid_value(
                    "params",
                    format!("'{reserved}' is managed by the pager"),
                ));
            }
        }
        Ok(())
    }

    /// Decoder settings
    pub fn decoder(&self) -> DecoderConfig {
        DecoderConfig {
            format: self.format,
            records_path: self.records_path.clone().none_if_empty(),
        }
    }

    /// HTTP client settings
    pub fn http_client_config(&self) -> HttpClientConfig {
        let http = &self.http;
        let mut builder = HttpClientConfig::builder()
            .timeout(Duration::from_secs(http.timeout_secs))
            .max_retries(http.max_retries)
            .backoff(
                http.backoff,
                Duration::from_millis(http.initial_backoff_ms),
                Duration::from_millis(http.max_backoff_ms),
            );

        builder = match &http.rate_limit {
            Some(limit) => builder.rate_limit(limit.clone()),
            None => builder.no_rate_limit(),
        };

        for (key, value) in &http.headers {
            builder = builder.header(key, value);
        }

        if let Some(auth) = &self.auth {
            builder = builder.auth(auth.clone());
        }

        if let Some(agent) = http.user_agent.clone().none_if_empty() {
            builder = builder.user_agent(agent);
        }

        builder.build()
    }

    /// Build a paging resource for the configured collection
    pub fn build_resource(&self) -> Result<PagingResource<HttpPageSource>> {
        self.validate()?;
        let client = HttpClient::with_config(self.http_client_config())?;
        let source = HttpPageSource::new(client, &self.endpoint, self.decoder().build())
            .with_conditional_requests(self.conditional_requests);

        Ok(PagingResource::new(source)
            .with_params(self.params.clone())
            .with_page_size(self.page_size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const FULL_CONFIG: &str = r#"
endpoint: https://example.com/api/organization
page_size: 10
params:
  userId: user123
records_path: data
conditional_requests: true
auth:
  type: bearer
  token: secret
http:
  timeout_secs: 5
  max_retries: 1
  backoff: constant
  rate_limit:
    requests_per_second: 20
  headers:
    X-Tenant: acme
  user_agent: dashboard/2.0
"#;

    #[test]
    fn test_parse_minimal_config() {
        let config = PagerConfig::parse("endpoint: https://example.com/api/items").unwrap();
        assert_eq!(config, PagerConfig::new("https://example.com/api/items"));
        assert_eq!(config.page_size, 30);
        assert_eq!(config.http, HttpSettings::default());
    }

    #[test]
    fn test_parse_full_config() {
        let config = PagerConfig::parse(FULL_CONFIG).unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.params.get("userId"), Some(&"user123".to_string()));
        assert!(config.conditional_requests);
        assert_eq!(
            config.auth,
            Some(HttpAuth::Bearer {
                token: "secret".to_string()
            })
        );
        assert_eq!(config.decoder().records_path.as_deref(), Some("data"));

        let http = config.http_client_config();
        assert_eq!(http.timeout, Duration::from_secs(5));
        assert_eq!(http.max_retries, 1);
        assert_eq!(http.backoff_type, BackoffType::Constant);
        assert_eq!(http.rate_limit, Some(RateLimiterConfig::new(20, 10)));
        assert_eq!(http.default_headers.get("X-Tenant"), Some(&"acme".to_string()));
        assert_eq!(http.user_agent, "dashboard/2.0");
        assert!(http.auth.is_some());
    }

    #[test]
    fn test_parse_json_config() {
        let config =
            PagerConfig::parse(r#"{"endpoint": "http://localhost:8080/api", "page_size": 5}"#)
                .unwrap();
        assert_eq!(config.page_size, 5);
        assert!(config.http_client_config().rate_limit.is_none());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let err = PagerConfig::parse("endpoint: ''").unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));

        let err = PagerConfig::parse("endpoint: not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));

        let err = PagerConfig::parse("endpoint: ftp://example.com/items").unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));

        let err =
            PagerConfig::parse("endpoint: https://example.com\npage_size: 0").unwrap_err();
        assert!(err.to_string().contains("page_size"));

        let err = PagerConfig::parse(
            "endpoint: https://example.com\nparams:\n  skipCount: '5'",
        )
        .unwrap_err();
        assert!(err.to_string().contains("skipCount"));
    }

    #[test]
    fn test_missing_endpoint_is_yaml_error() {
        let err = PagerConfig::parse("page_size: 10").unwrap_err();
        assert!(matches!(err, Error::YamlParse(_)));
    }

    #[test]
    fn test_build_resource() {
        let config = PagerConfig::parse(FULL_CONFIG).unwrap();
        let resource = config.build_resource().unwrap();

        assert_eq!(resource.request_params().max_items, 10);
        assert_eq!(resource.base_params().get("userId"), Some(&"user123".to_string()));
        assert_eq!(resource.source().endpoint(), "https://example.com/api/organization");
        assert!(resource.source().is_conditional());
        assert_eq!(resource.pagination_state().current_page_number, 0);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL_CONFIG.as_bytes()).unwrap();

        let config = PagerConfig::from_file(file.path()).unwrap();
        assert_eq!(config.endpoint, "https://example.com/api/organization");
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = PagerConfig::from_file(dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(err, Error::FileNotFound { .. }));
    }
}
