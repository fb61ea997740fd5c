//! Environment variable source: MAPCONF_* prefix with __ separator

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;

/// Prefix for settings environment variables.
pub const ENV_PREFIX: &str = "MAPCONF";

/// Add environment variable overlay to builder.
/// Uses MAPCONF_ prefix and __ as separator for nested keys
/// (e.g. `MAPCONF_HTTP__BASE_URL`).
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );
    Ok(builder)
}
