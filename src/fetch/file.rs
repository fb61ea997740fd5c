//! Local file fetcher, for configs deployed next to the binary or in tests.

use super::{decode_body, fetch_error, ConfigFetcher};
use crate::error::ConfigError;
use crate::types::ConfigDocument;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads config documents from the filesystem.
///
/// Relative paths resolve against `base_dir`; a `file://` prefix is stripped.
pub struct FileFetcher {
    base_dir: PathBuf,
}

impl FileFetcher {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn resolve(&self, url: &str) -> PathBuf {
        let raw = url.strip_prefix("file://").unwrap_or(url);
        let path = Path::new(raw);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

#[async_trait]
impl ConfigFetcher for FileFetcher {
    async fn fetch(&self, url: &str) -> Result<ConfigDocument, ConfigError> {
        let path = self.resolve(url);
        debug!(path = %path.display(), "Reading config document");
        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| fetch_error(url, e))?;
        decode_body(url, &body)
    }
}
