//! Global settings file: $XDG_CONFIG_HOME/map-config/config.toml (optional)

use crate::config::paths::xdg_root;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;

/// Add the global settings file to builder when it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    match xdg_root::global_config_path() {
        Some(path) if path.exists() => Ok(builder.add_source(File::from(path).required(false))),
        _ => Ok(builder),
    }
}
