//! Config document transport
//!
//! The loader fetches one document per language through a [`ConfigFetcher`].
//! Failures must be distinguishable from success; the loader attaches the
//! requesting language to any error a fetcher returns.

pub mod file;
pub mod http;

use crate::error::ConfigError;
use crate::types::ConfigDocument;
use async_trait::async_trait;

pub use file::FileFetcher;
pub use http::{HttpFetcher, HttpSettings};

/// Fetches a configuration document by URL.
#[async_trait]
pub trait ConfigFetcher: Send + Sync {
    /// Fetch and decode the JSON document at `url`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Fetch`], [`ConfigError::Status`] or
    /// [`ConfigError::InvalidBody`] when the document cannot be obtained.
    async fn fetch(&self, url: &str) -> Result<ConfigDocument, ConfigError>;
}

pub(crate) fn fetch_error(url: &str, message: impl ToString) -> ConfigError {
    ConfigError::Fetch {
        language: String::new(),
        url: url.to_string(),
        message: message.to_string(),
    }
}

pub(crate) fn decode_body(url: &str, body: &str) -> Result<ConfigDocument, ConfigError> {
    serde_json::from_str(body).map_err(|e| ConfigError::InvalidBody {
        language: String::new(),
        url: url.to_string(),
        message: e.to_string(),
    })
}
