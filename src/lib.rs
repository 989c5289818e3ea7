//! Syncstore: per-user persistence for a file synchronization agent
//!
//! Stores, per authenticated user, the agent configuration and the last known
//! state of each remote file download, plus a pointer to the last logged-in
//! user, all in one embedded sled database.

pub mod config;
pub mod error;
pub mod logging;
pub mod record;
pub mod store;
pub mod types;

pub use error::{Result, StoreError};
pub use record::{DownloadState, DownloadStatus, Interval, SyncConfig};
pub use store::Store;
pub use types::FileId;
