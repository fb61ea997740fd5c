//! Defaults document
//!
//! The base layer merged under every language. Its shape is opaque to the
//! loader; it is read from a JSON or TOML file, or supplied in code.

use crate::error::ConfigError;
use crate::types::ConfigDocument;
use std::path::Path;

/// Load a defaults document, choosing the parser by file extension.
///
/// `.toml` files are parsed as TOML; anything else as JSON.
pub fn load_defaults(path: &Path) -> Result<ConfigDocument, ConfigError> {
    let what = format!("defaults file {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::parse(&what, e))?;
    let is_toml = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("toml"));
    if is_toml {
        let value: toml::Value = toml::from_str(&content).map_err(|e| ConfigError::parse(&what, e))?;
        serde_json::to_value(value).map_err(|e| ConfigError::parse(&what, e))
    } else {
        serde_json::from_str(&content).map_err(|e| ConfigError::parse(&what, e))
    }
}

/// Load defaults from an optional path; no path yields an empty object.
pub fn load_optional_defaults(path: Option<&Path>) -> Result<ConfigDocument, ConfigError> {
    match path {
        Some(path) => load_defaults(path),
        None => Ok(empty_defaults()),
    }
}

pub fn empty_defaults() -> ConfigDocument {
    ConfigDocument::Object(serde_json::Map::new())
}
