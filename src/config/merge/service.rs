//! MergeService: orchestrates sources, applies merge policy, deserializes to StoreSettings.

use crate::config::sources::{environment, global_file};
use crate::config::StoreSettings;
use config::ConfigError;
use config::File;
use std::path::Path;

use super::merge_policy;

/// Merge service for settings composition.
pub struct MergeService;

impl MergeService {
    /// Load settings from standard sources.
    /// Precedence: defaults (lowest) -> global file -> environment (highest).
    pub fn load() -> Result<StoreSettings, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = global_file::add_to_builder(builder)?;
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }

    /// Load settings from a specific file with environment overlay.
    pub fn load_from_file(path: &Path) -> Result<StoreSettings, ConfigError> {
        let builder = merge_policy::builder_with_defaults()?;
        let builder = builder.add_source(File::from(path));
        let builder = environment::add_to_builder(builder)?;

        let config = builder.build()?;
        config.try_deserialize()
    }
}
