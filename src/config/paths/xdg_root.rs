//! XDG Base Directory utilities for store settings and data.

use crate::error::{Result, StoreError};
use directories::ProjectDirs;
use std::path::PathBuf;

const APP_NAME: &str = "syncstore";

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
pub fn config_home() -> Result<PathBuf> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = std::env::var("HOME").map_err(|_| {
        StoreError::Environment(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(PathBuf::from(home).join(".config"))
}

/// Path of the global settings file: `$XDG_CONFIG_HOME/syncstore/config.toml`
pub fn global_config_path() -> Result<PathBuf> {
    Ok(config_home()?.join(APP_NAME).join("config.toml"))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", APP_NAME, APP_NAME).ok_or_else(|| {
        StoreError::Environment("Could not determine platform data directory".to_string())
    })
}

/// Default database location inside the platform data directory.
pub fn default_database_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_dir().join("sync.db"))
}

/// Default log file location inside the platform state directory, falling
/// back to the data directory on platforms without one.
pub fn default_log_file_path() -> Result<PathBuf> {
    let dirs = project_dirs()?;
    let dir = dirs.state_dir().unwrap_or_else(|| dirs.data_dir());
    Ok(dir.join("syncstore.log"))
}
