pub mod service;

pub(crate) mod merge_policy {
    //! Built-in defaults applied beneath every other source.

    use crate::store::DEFAULT_OPEN_TIMEOUT;
    use config::builder::DefaultState;
    use config::{Config, ConfigBuilder, ConfigError};

    pub fn builder_with_defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default(
                "database.open_timeout_secs",
                DEFAULT_OPEN_TIMEOUT.as_secs() as i64,
            )?
            .set_default("database.sync_writes", true)?
            .set_default("logging.level", "info")
    }
}
