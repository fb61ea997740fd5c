//! MergeService: orchestrates sources, applies merge policy, deserializes to LoaderSettings.

use crate::config::sources::{environment, explicit_file, global_file};
use crate::config::LoaderSettings;
use config::ConfigError;
use std::path::Path;

use super::policy;

/// Merge service for settings composition.
pub struct MergeService;

impl MergeService {
    /// Load settings from standard sources.
    /// Precedence: defaults (lowest) -> global file -> explicit file -> environment (highest).
    pub fn load(explicit: Option<&Path>) -> Result<LoaderSettings, ConfigError> {
        let builder = policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = match explicit {
            Some(path) => explicit_file::add_to_builder(builder, path)?,
            None => builder,
        };
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
