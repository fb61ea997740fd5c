//! HTTP fetcher backed by reqwest.

use super::{decode_body, fetch_error, ConfigFetcher};
use crate::error::ConfigError;
use crate::types::ConfigDocument;
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// HTTP transport settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpSettings {
    /// Base URL that relative templates are resolved against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Whole-request timeout in seconds (default: 30)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout in seconds (default: 10)
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout_secs: default_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Fetches config documents over HTTP(S).
///
/// Non-success statuses are errors; bodies must decode as JSON.
pub struct HttpFetcher {
    client: Client,
    base_url: Option<Url>,
}

impl HttpFetcher {
    /// Build a fetcher from settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Settings`] when the base URL is invalid or the
    /// client cannot be built.
    pub fn new(settings: &HttpSettings) -> Result<Self, ConfigError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ConfigError::Settings(format!("Failed to build HTTP client: {}", e)))?;
        let base_url = settings
            .base_url
            .as_deref()
            .map(|base| {
                Url::parse(base).map_err(|e| {
                    ConfigError::Settings(format!("Invalid base URL '{}': {}", base, e))
                })
            })
            .transpose()?;
        Ok(Self { client, base_url })
    }

    /// Resolve `url` against the base URL when it is relative.
    ///
    /// Absolute URLs are returned unchanged; relative URLs fail without a base.
    pub fn resolve(&self, url: &str) -> Result<Url, ConfigError> {
        match &self.base_url {
            Some(base) => base.join(url),
            None => Url::parse(url),
        }
        .map_err(|e| fetch_error(url, e))
    }
}

#[async_trait]
impl ConfigFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<ConfigDocument, ConfigError> {
        let resolved = self.resolve(url)?;
        debug!(url = %resolved, "Fetching config document");
        let response = self
            .client
            .get(resolved.clone())
            .send()
            .await
            .map_err(|e| fetch_error(resolved.as_str(), e))?;
        let status = response.status();
        if !status.is_success() {
            return Err(ConfigError::Status {
                language: String::new(),
                url: resolved.to_string(),
                status: status.as_u16(),
            });
        }
        let body = response
            .text()
            .await
            .map_err(|e| fetch_error(resolved.as_str(), e))?;
        decode_body(resolved.as_str(), &body)
    }
}
