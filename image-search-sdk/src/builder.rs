// ABOUTME: Builder pattern implementation for SearchClient configuration
// ABOUTME: Provides typed configuration with defaults for prefix, timeout and headers

use crate::constants::{timeouts, urls};
use crate::error::SearchError;
use crate::SearchClient;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Duration;
use typed_builder::TypedBuilder;

#[derive(Debug, TypedBuilder)]
#[builder(build_method(into = Result<SearchClient, SearchError>))]
pub struct SearchClientConfig {
    #[builder(setter(into))]
    pub base_url: String,

    #[builder(default = urls::API_PREFIX.to_string(), setter(into))]
    pub api_prefix: String,

    /// Applied to every operation, multipart uploads included
    #[builder(default = timeouts::HTTP_REQUEST_TIMEOUT)]
    pub timeout: Duration,

    /// Sent with every request; empty unless the deployment needs
    /// authentication or routing headers
    #[builder(default)]
    pub headers: HeaderMap,
}

impl From<SearchClientConfig> for Result<SearchClient, SearchError> {
    fn from(config: SearchClientConfig) -> Self {
        SearchClient::from_config(config)
    }
}

impl SearchClient {
    pub fn builder() -> SearchClientConfigBuilder<((), (), (), ())> {
        SearchClientConfig::builder()
    }

    /// Parse a `name: value` pair into a header entry
    pub fn parse_header(raw: &str) -> Result<(HeaderName, HeaderValue), SearchError> {
        let (name, value) = raw
            .split_once(':')
            .ok_or_else(|| SearchError::Configuration(format!("Invalid header '{}'", raw)))?;

        let name = HeaderName::from_bytes(name.trim().as_bytes())
            .map_err(|e| SearchError::Configuration(format!("Invalid header name: {}", e)))?;
        let value = HeaderValue::from_str(value.trim())
            .map_err(|e| SearchError::Configuration(format!("Invalid header value: {}", e)))?;

        Ok((name, value))
    }
}
