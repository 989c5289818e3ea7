//! Per-user agent configuration record.

use crate::error::{Result, StoreError};
use crate::record::Interval;
use crate::types::FileId;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory created under the user's home for downloads.
pub const APP_DIR_NAME: &str = "putio-sync";

pub const DEFAULT_POLL_INTERVAL: Interval = Interval::from_secs(2 * 60);
pub const DEFAULT_SEGMENTS_PER_FILE: u32 = 3;
pub const DEFAULT_MAX_PARALLEL_FILES: u32 = 2;
/// Sentinel for `download_from`: no source folder filter.
pub const NO_FOLDER_FILTER: FileId = -1;

pub const LIMIT_SEGMENTS_PER_FILE: u32 = 8;
pub const LIMIT_PARALLEL_FILES: u32 = 8;

/// Configuration of the sync agent for one user.
///
/// Missing fields decode as zero values so records written by older
/// versions remain readable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SyncConfig {
    /// Walk the source folder every interval
    #[serde(default)]
    pub poll_interval: Interval,

    /// Local destination for downloaded files
    #[serde(default)]
    pub download_to: PathBuf,

    /// Only download files under this remote folder; -1 disables the filter
    #[serde(default)]
    pub download_from: FileId,

    /// Max connections per file download
    #[serde(default)]
    pub segments_per_file: u32,

    /// Max files downloaded in parallel
    #[serde(default)]
    pub max_parallel_files: u32,

    /// OAuth2 token issued to the agent for this user
    #[serde(default)]
    pub oauth2_token: String,

    #[serde(default)]
    pub watch_torrents_folder: bool,

    /// Local folder watched for new .torrent files
    #[serde(default)]
    pub torrents_folder: PathBuf,

    /// Last pause/resume state
    #[serde(default)]
    pub is_paused: bool,

    /// Delete the remote file after a successful download
    #[serde(default)]
    pub delete_remote_file: bool,
}

impl SyncConfig {
    /// Built-in defaults with downloads placed under `home`.
    pub fn defaults_in(home: &Path) -> Self {
        Self {
            poll_interval: DEFAULT_POLL_INTERVAL,
            download_to: home.join(APP_DIR_NAME),
            download_from: NO_FOLDER_FILTER,
            segments_per_file: DEFAULT_SEGMENTS_PER_FILE,
            max_parallel_files: DEFAULT_MAX_PARALLEL_FILES,
            oauth2_token: String::new(),
            watch_torrents_folder: false,
            torrents_folder: PathBuf::new(),
            is_paused: true,
            delete_remote_file: false,
        }
    }

    /// Built-in defaults for the invoking OS account.
    pub fn defaults() -> Result<Self> {
        let dirs = directories::BaseDirs::new().ok_or_else(|| {
            StoreError::Environment("Could not determine home directory".to_string())
        })?;
        Ok(Self::defaults_in(dirs.home_dir()))
    }

    pub fn has_folder_filter(&self) -> bool {
        self.download_from != NO_FOLDER_FILTER
    }

    /// Validate the configuration.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.poll_interval.is_zero() {
            return Err("Poll interval must be greater than zero".to_string());
        }

        if self.download_to.as_os_str().is_empty() {
            return Err("Download destination cannot be empty".to_string());
        }

        if self.segments_per_file == 0 || self.segments_per_file > LIMIT_SEGMENTS_PER_FILE {
            return Err(format!(
                "Segments per file must be between 1 and {}, got {}",
                LIMIT_SEGMENTS_PER_FILE, self.segments_per_file
            ));
        }

        if self.max_parallel_files == 0 || self.max_parallel_files > LIMIT_PARALLEL_FILES {
            return Err(format!(
                "Max parallel files must be between 1 and {}, got {}",
                LIMIT_PARALLEL_FILES, self.max_parallel_files
            ));
        }

        if self.watch_torrents_folder && self.torrents_folder.as_os_str().is_empty() {
            return Err("Torrents folder must be set when watching is enabled".to_string());
        }

        Ok(())
    }
}
