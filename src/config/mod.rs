//! Loader settings
//!
//! Settings that govern how the loader behaves (placeholder token, default
//! language list, transport, logging), layered with the `config` crate.
//! These are distinct from the application configuration the loader fetches.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::SettingsLoader;

use crate::fetch::HttpSettings;
use crate::logging::LoggingConfig;
use crate::source::DeclaredAttributes;
use crate::types::{DEFAULT_INLINE_LANGUAGE, DEFAULT_LANGUAGES, DEFAULT_PLACEHOLDER};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Effective loader settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderSettings {
    /// Declared config source: inline JSON text or a URL template
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    /// Declared language list as a JSON array
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub languages: Option<String>,

    /// Token substituted with the language code in URL templates
    #[serde(default = "default_placeholder")]
    pub placeholder: String,

    /// Languages used when none are declared or the declaration is malformed
    #[serde(default = "default_languages")]
    pub default_languages: Vec<String>,

    /// Language that inline and absent sources publish under
    #[serde(default = "default_inline_language")]
    pub inline_language: String,

    /// Language served when the selected one was never loaded
    #[serde(default = "default_inline_language")]
    pub fallback_language: String,

    /// JSON or TOML file holding the defaults document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub defaults_path: Option<PathBuf>,

    #[serde(default)]
    pub http: HttpSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

pub(crate) fn default_placeholder() -> String {
    DEFAULT_PLACEHOLDER.to_string()
}

pub(crate) fn default_languages() -> Vec<String> {
    DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect()
}

pub(crate) fn default_inline_language() -> String {
    DEFAULT_INLINE_LANGUAGE.to_string()
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            source: None,
            languages: None,
            placeholder: default_placeholder(),
            default_languages: default_languages(),
            inline_language: default_inline_language(),
            fallback_language: default_inline_language(),
            defaults_path: None,
            http: HttpSettings::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl LoaderSettings {
    /// Declared attributes carried by these settings.
    pub fn declared(&self) -> DeclaredAttributes {
        DeclaredAttributes::new(self.source.clone(), self.languages.clone())
    }
}
