//! Environment variable source: SYNCSTORE_* prefix with __ separator

use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, Environment, Map};

pub const ENV_PREFIX: &str = "SYNCSTORE";

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

/// Add the process environment as the top overlay, e.g.
/// `SYNCSTORE__DATABASE__OPEN_TIMEOUT_SECS`.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(environment()))
}

/// Same overlay, read from `vars` instead of the process environment.
pub fn add_vars_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vars: Map<String, String>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder.add_source(environment().source(Some(vars))))
}
