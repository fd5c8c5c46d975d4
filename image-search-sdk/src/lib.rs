// ABOUTME: Image search SDK: typed client for a search-by-image service
// ABOUTME: Resolves submission images, builds requests, calls the service and renders results

pub mod builder;
pub mod constants;
pub mod controller;
pub mod correlation;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod render;
pub mod request;
pub mod source;
pub mod types;

#[cfg(test)]
mod test_helpers;

use reqwest::header::{HeaderValue, USER_AGENT};
use std::time::Duration;
use url::Url;

pub use builder::SearchClientConfig;
pub use controller::ImageSearchController;
pub use correlation::CorrelationIdGenerator;
pub use error::{ErrorCategory, SearchError};
pub use gateway::ImageSearchGateway;
pub use render::{
    BufferedRegion, DisplayRegion, Notice, NoticeKind, Notifier, RegionEntry, RenderMode,
    ResultRenderer,
};
pub use request::{FieldValues, FormParams, ImageFilter, RequestBuilder, RequestEnvelope};
pub use reqwest::header::HeaderMap;
pub use source::ImageSource;
pub use types::{ImageDoc, Operation, ResultItem, ServiceResponse, SourceMode, SubmissionImage};

pub type Result<T> = std::result::Result<T, SearchError>;

const USER_AGENT_VALUE: &str = concat!("image-search-sdk/", env!("CARGO_PKG_VERSION"));

/// HTTP client for the search service.
#[derive(Debug, Clone)]
pub struct SearchClient {
    client: reqwest::Client,
    base_url: Url,
    api_prefix: String,
    timeout: Duration,
}

impl SearchClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        Self::builder().base_url(base_url).build()
    }

    pub(crate) fn from_config(config: SearchClientConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| SearchError::Configuration(format!("Invalid base URL: {}", e)))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(SearchError::Configuration(format!(
                "Invalid base URL: unsupported scheme '{}'",
                base_url.scheme()
            )));
        }

        let mut headers = config.headers;
        let agent = HeaderValue::from_static(USER_AGENT_VALUE);
        headers.entry(USER_AGENT).or_insert(agent);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        let api_prefix = format!("/{}", config.api_prefix.trim_matches('/'));

        Ok(Self {
            client,
            base_url,
            api_prefix,
            timeout: config.timeout,
        })
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL of an operation
    pub fn endpoint(&self, operation: Operation) -> String {
        let prefix = if self.api_prefix == "/" {
            ""
        } else {
            self.api_prefix.as_str()
        };
        format!(
            "{}{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            prefix,
            operation.name()
        )
    }
}
