//! Global settings file source: `$XDG_CONFIG_HOME/syncstore/config.toml`

use crate::config::xdg;
use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::File;

/// Add the global settings file, if present, to builder.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = match xdg::global_config_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!("Skipping global settings file: {}", e);
            return Ok(builder);
        }
    };
    Ok(builder.add_source(File::from(path.as_path()).required(false)))
}
