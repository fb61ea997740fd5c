//! Config Store
//!
//! Per-language published configuration. Entries are written once, in the
//! order languages resolve, and are immutable afterwards. Lookups are by
//! language key, never by position.

use crate::error::ConfigError;
use crate::types::{ConfigDocument, LanguageCode, PublishedConfig};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct Entries {
    by_language: HashMap<LanguageCode, PublishedConfig>,
    /// Languages in resolution order
    order: Vec<LanguageCode>,
}

/// Language code -> merged configuration.
#[derive(Default)]
pub struct ConfigStore {
    entries: RwLock<Entries>,
}

impl ConfigStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish the merged config for `lang`.
    ///
    /// Fails with [`ConfigError::StoreConflict`] if `lang` already has an entry.
    pub(crate) fn publish(
        &self,
        lang: &str,
        config: ConfigDocument,
    ) -> Result<PublishedConfig, ConfigError> {
        let mut entries = self.entries.write();
        if entries.by_language.contains_key(lang) {
            return Err(ConfigError::StoreConflict(lang.to_string()));
        }
        let published = Arc::new(config);
        entries
            .by_language
            .insert(lang.to_string(), Arc::clone(&published));
        entries.order.push(lang.to_string());
        Ok(published)
    }

    pub fn get(&self, lang: &str) -> Option<PublishedConfig> {
        self.entries.read().by_language.get(lang).cloned()
    }

    pub fn contains(&self, lang: &str) -> bool {
        self.entries.read().by_language.contains_key(lang)
    }

    /// Published languages in the order they resolved.
    pub fn languages(&self) -> Vec<LanguageCode> {
        self.entries.read().order.clone()
    }

    /// Ordered copy of every published entry.
    pub fn snapshot(&self) -> Vec<(LanguageCode, PublishedConfig)> {
        let entries = self.entries.read();
        entries
            .order
            .iter()
            .filter_map(|lang| {
                entries
                    .by_language
                    .get(lang)
                    .map(|cfg| (lang.clone(), Arc::clone(cfg)))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl std::fmt::Debug for ConfigStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigStore")
            .field("languages", &self.languages())
            .finish()
    }
}
