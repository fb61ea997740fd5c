//! SettingsLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::LoaderSettings;
use config::ConfigError;
use std::path::Path;

/// Loader settings facade.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from the global file and environment.
    pub fn load() -> Result<LoaderSettings, ConfigError> {
        MergeService::load(None)
    }

    /// Load settings with a specific file layered over the global file.
    pub fn load_from_file(path: &Path) -> Result<LoaderSettings, ConfigError> {
        MergeService::load(Some(path))
    }

    /// Create default settings.
    pub fn default() -> LoaderSettings {
        LoaderSettings::default()
    }
}
