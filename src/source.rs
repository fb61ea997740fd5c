//! Declared configuration source
//!
//! Classifies the raw declared attributes into a [`ConfigSource`] and a
//! language list. Parse failures here are recovered locally: they are logged
//! and the next strategy is used.

use crate::error::ConfigError;
use crate::types::{ConfigDocument, LanguageCode, DEFAULT_LANGUAGES};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Raw attributes declared by the host page or process, read once at initialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredAttributes {
    /// Inline JSON text or a URL template; `None` means no source declared.
    #[serde(default)]
    pub config: Option<String>,
    /// JSON array of language codes.
    #[serde(default)]
    pub languages: Option<String>,
}

impl DeclaredAttributes {
    pub fn new(config: Option<String>, languages: Option<String>) -> Self {
        Self { config, languages }
    }

    /// Attributes with no source declared.
    pub fn absent() -> Self {
        Self::default()
    }
}

/// How configuration was declared.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// A literal JSON document.
    Inline(ConfigDocument),
    /// A URL containing a placeholder substituted per language.
    UrlTemplate(UrlTemplate),
    /// No source declared; defaults only.
    Absent,
}

impl ConfigSource {
    /// Classify a raw declared config attribute.
    ///
    /// Any text that parses as JSON is inline config. Text that fails to
    /// parse is used verbatim as a URL template. An empty attribute counts as
    /// no source at all.
    pub fn classify(raw: Option<&str>, placeholder: &str) -> Self {
        let raw = match raw {
            Some(raw) if !raw.is_empty() => raw,
            _ => return ConfigSource::Absent,
        };
        match parse_inline(raw) {
            Ok(doc) => ConfigSource::Inline(doc),
            Err(e) => {
                debug!(error = %e, "Config attribute is not inline JSON, treating as URL template");
                ConfigSource::UrlTemplate(UrlTemplate::new(raw, placeholder))
            }
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ConfigSource::Inline(_) => "inline",
            ConfigSource::UrlTemplate(_) => "url_template",
            ConfigSource::Absent => "absent",
        }
    }
}

fn parse_inline(raw: &str) -> Result<ConfigDocument, ConfigError> {
    serde_json::from_str(raw).map_err(|e| ConfigError::parse("inline config", e))
}

/// URL string with a language placeholder token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    template: String,
    placeholder: String,
}

impl UrlTemplate {
    pub fn new(template: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            placeholder: placeholder.into(),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// Whether the template actually varies by language.
    pub fn has_placeholder(&self) -> bool {
        !self.placeholder.is_empty() && self.template.contains(&self.placeholder)
    }

    /// Substitute every placeholder occurrence with `lang`.
    pub fn expand(&self, lang: &str) -> String {
        if self.placeholder.is_empty() {
            return self.template.clone();
        }
        self.template.replace(&self.placeholder, lang)
    }
}

/// Ordered list of language codes to load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageList(Vec<LanguageCode>);

impl LanguageList {
    /// Parse a declared language list, falling back to `fallback` when absent or malformed.
    pub fn parse_or(raw: Option<&str>, fallback: &[LanguageCode]) -> Self {
        let Some(raw) = raw else {
            return Self(fallback.to_vec());
        };
        match parse_language_list(raw) {
            Ok(list) => Self(list),
            Err(e) => {
                warn!(error = %e, fallback = ?fallback, "Using default language list");
                Self(fallback.to_vec())
            }
        }
    }

    pub fn as_slice(&self) -> &[LanguageCode] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &LanguageCode> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for LanguageList {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGES.iter().map(|l| l.to_string()).collect())
    }
}

fn parse_language_list(raw: &str) -> Result<Vec<LanguageCode>, ConfigError> {
    let list: Vec<LanguageCode> =
        serde_json::from_str(raw).map_err(|e| ConfigError::parse("language list", e))?;
    // Each language resolves to exactly one store entry, so repeats are dropped.
    let mut unique: Vec<LanguageCode> = Vec::with_capacity(list.len());
    for lang in list {
        let lang = lang.trim().to_string();
        if !lang.is_empty() && !unique.contains(&lang) {
            unique.push(lang);
        }
    }
    Ok(unique)
}
