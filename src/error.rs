//! Error types for configuration loading.

use thiserror::Error;

/// Errors produced while resolving, fetching, and publishing configuration.
///
/// The type is `Clone` because a single initialization outcome is replayed to
/// every holder of the shared initialization handle.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A declared attribute or document could not be parsed.
    #[error("Parse error in {what}: {message}")]
    Parse { what: String, message: String },

    /// Transport-level failure fetching a per-language document.
    #[error("Failed to fetch config for '{language}' from {url}: {message}")]
    Fetch {
        language: String,
        url: String,
        message: String,
    },

    /// The transport answered with a non-success status.
    #[error("Config request for '{language}' to {url} returned status {status}")]
    Status {
        language: String,
        url: String,
        status: u16,
    },

    /// The fetched body was not a JSON document.
    #[error("Config body for '{language}' from {url} is not valid JSON: {message}")]
    InvalidBody {
        language: String,
        url: String,
        message: String,
    },

    /// A language entry was written twice.
    #[error("Config for language '{0}' is already published")]
    StoreConflict(String),

    /// Requested language was never populated.
    #[error("No config loaded for language '{0}'")]
    LanguageNotLoaded(String),

    /// Loader settings or logging could not be set up.
    #[error("Settings error: {0}")]
    Settings(String),
}

impl ConfigError {
    pub(crate) fn parse(what: impl Into<String>, message: impl ToString) -> Self {
        ConfigError::Parse {
            what: what.into(),
            message: message.to_string(),
        }
    }

    /// Attach the language a fetch was issued for.
    ///
    /// Fetchers report errors without knowing which language requested the
    /// URL; the loader fills it in here.
    pub(crate) fn for_language(self, lang: &str) -> Self {
        match self {
            ConfigError::Fetch { url, message, .. } => ConfigError::Fetch {
                language: lang.to_string(),
                url,
                message,
            },
            ConfigError::Status { url, status, .. } => ConfigError::Status {
                language: lang.to_string(),
                url,
                status,
            },
            ConfigError::InvalidBody { url, message, .. } => ConfigError::InvalidBody {
                language: lang.to_string(),
                url,
                message,
            },
            other => other,
        }
    }
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::Settings(err.to_string())
    }
}
