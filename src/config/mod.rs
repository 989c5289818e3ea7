//! Store settings
//!
//! Settings of the storage layer itself (where the database lives, how long
//! to wait for its lock, how to log), as opposed to the per-user
//! [`SyncConfig`](crate::record::SyncConfig) records kept inside the store.
//!
//! Sources, lowest precedence first: built-in defaults, the global file
//! `$XDG_CONFIG_HOME/syncstore/config.toml`, `SYNCSTORE__*` environment
//! variables.

pub mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::SettingsLoader;
pub use paths::xdg_root as xdg;

use crate::error::Result;
use crate::logging::LoggingConfig;
use crate::store::DEFAULT_OPEN_TIMEOUT;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Top-level settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_open_timeout_secs() -> u64 {
    DEFAULT_OPEN_TIMEOUT.as_secs()
}

fn default_true() -> bool {
    true
}

/// Database settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// Database location; None means the platform data directory
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Seconds to wait for a lock held by another process
    #[serde(default = "default_open_timeout_secs")]
    pub open_timeout_secs: u64,

    /// Flush to disk after every write
    #[serde(default = "default_true")]
    pub sync_writes: bool,
}

impl DatabaseSettings {
    /// The configured path, or the platform default.
    pub fn resolve_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) if !path.as_os_str().is_empty() => Ok(path.clone()),
            _ => xdg::default_database_path(),
        }
    }

    pub fn open_timeout(&self) -> Duration {
        Duration::from_secs(self.open_timeout_secs)
    }
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: None,
            open_timeout_secs: default_open_timeout_secs(),
            sync_writes: default_true(),
        }
    }
}
