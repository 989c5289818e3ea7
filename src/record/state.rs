//! Download state records.
//!
//! A `DownloadState` is the last known status of one remote file transfer.
//! The ingestion side owns the transfer fields; the store only persists the
//! record as a whole, keyed by `file_id`.

use crate::types::FileId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Transfer status of a download.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadStatus {
    #[default]
    Queued,
    Downloading,
    Paused,
    Completed,
    Failed,
    Stopped,
}

/// Last known state of a single download job
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DownloadState {
    /// Remote file ID; doubles as the record key
    #[serde(default)]
    pub file_id: FileId,
    #[serde(default)]
    pub name: String,
    /// Total size in bytes, 0 when unknown
    #[serde(default)]
    pub size: i64,
    /// Bytes written so far
    #[serde(default)]
    pub downloaded: i64,
    #[serde(default)]
    pub status: DownloadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_path: Option<PathBuf>,
    /// Hidden records stay stored but are left out of listings
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl DownloadState {
    pub fn new(file_id: FileId, name: impl Into<String>) -> Self {
        Self {
            file_id,
            name: name.into(),
            ..Self::default()
        }
    }

    /// Fraction of the file downloaded, in `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        if self.size <= 0 {
            return 0.0;
        }
        (self.downloaded.max(0) as f64 / self.size as f64).min(1.0)
    }

    pub fn is_finished(&self) -> bool {
        matches!(
            self.status,
            DownloadStatus::Completed | DownloadStatus::Failed | DownloadStatus::Stopped
        )
    }
}
