//! Persisted record types.

pub mod interval;
pub mod state;
pub mod sync_config;

pub use interval::Interval;
pub use state::{DownloadState, DownloadStatus};
pub use sync_config::SyncConfig;
