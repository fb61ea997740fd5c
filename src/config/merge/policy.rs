//! Merge rules: built-in defaults at the lowest precedence.

use crate::config::{default_inline_language, default_languages, default_placeholder};
use config::builder::DefaultState;
use config::Config;
use config::ConfigBuilder;
use config::ConfigError;

/// Create a Config builder with settings defaults applied.
pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Config::builder()
        .set_default("placeholder", default_placeholder())?
        .set_default("default_languages", default_languages())?
        .set_default("inline_language", default_inline_language())?
        .set_default("fallback_language", default_inline_language())?
        .set_default("http.timeout_secs", 30)?
        .set_default("http.connect_timeout_secs", 10)
}
