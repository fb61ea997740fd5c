//! Language selection
//!
//! The loader does not own the active language; it asks a [`LanguageSelector`].
//! A selector can report a proposed (tentative) language in addition to the
//! committed one, and the proposed language wins when set.

use crate::types::{LanguageCode, DEFAULT_INLINE_LANGUAGE};
use parking_lot::RwLock;

/// Source of the active language.
pub trait LanguageSelector: Send + Sync {
    /// Tentative language being switched to, if any.
    fn proposed_language(&self) -> Option<String>;
    /// Committed language.
    fn current_language(&self) -> String;

    /// Language to resolve config for: proposed if set, else current.
    fn effective_language(&self) -> String {
        self.proposed_language()
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| self.current_language())
    }
}

/// Reduce a language tag to its lower-cased primary subtag.
///
/// `"en-CA"` and `"en_CA"` both become `"en"`.
pub fn normalize_language_tag(tag: &str) -> LanguageCode {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase()
}

#[derive(Debug, Default)]
struct Selection {
    current: String,
    proposed: Option<String>,
}

/// In-process selector that the host updates as the user switches language.
#[derive(Debug)]
pub struct SharedLanguageSelector {
    selection: RwLock<Selection>,
}

impl SharedLanguageSelector {
    pub fn new(current: impl Into<String>) -> Self {
        Self {
            selection: RwLock::new(Selection {
                current: current.into(),
                proposed: None,
            }),
        }
    }

    /// Commit `lang` as the current language and clear any proposal.
    pub fn use_language(&self, lang: impl Into<String>) {
        let mut selection = self.selection.write();
        selection.current = lang.into();
        selection.proposed = None;
    }

    pub fn propose(&self, lang: impl Into<String>) {
        self.selection.write().proposed = Some(lang.into());
    }

    pub fn clear_proposal(&self) {
        self.selection.write().proposed = None;
    }
}

impl Default for SharedLanguageSelector {
    fn default() -> Self {
        Self::new(DEFAULT_INLINE_LANGUAGE)
    }
}

impl LanguageSelector for SharedLanguageSelector {
    fn proposed_language(&self) -> Option<String> {
        self.selection.read().proposed.clone()
    }

    fn current_language(&self) -> String {
        self.selection.read().current.clone()
    }
}
