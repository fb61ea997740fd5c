//! Core types shared across the loader.

use std::sync::Arc;

/// LanguageCode: primary language subtag used as a store key (e.g. `"en"`)
pub type LanguageCode = String;

/// ConfigDocument: an opaque JSON configuration document
pub type ConfigDocument = serde_json::Value;

/// PublishedConfig: a merged document as published in the store; never mutated afterwards
pub type PublishedConfig = Arc<ConfigDocument>;

/// Placeholder substituted with the language code in URL templates
pub const DEFAULT_PLACEHOLDER: &str = "$LANG";

/// Language list used when none is declared or the declaration is unparsable
pub const DEFAULT_LANGUAGES: [&str; 2] = ["en", "fr"];

/// Language that inline and absent sources publish under
pub const DEFAULT_INLINE_LANGUAGE: &str = "en";
