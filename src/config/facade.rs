//! SettingsLoader facade delegating to merge service.

use super::merge::service::MergeService;
use super::StoreSettings;
use config::ConfigError;
use std::path::Path;

/// Settings loader facade.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from the global file and environment.
    pub fn load() -> Result<StoreSettings, ConfigError> {
        MergeService::load()
    }

    /// Load settings from a specific file.
    pub fn load_from_file(path: &Path) -> Result<StoreSettings, ConfigError> {
        MergeService::load_from_file(path)
    }
}
