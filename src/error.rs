//! Error types for the store.

use crate::types::FileId;
use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by the store layer.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The database could not be opened or locked within the open timeout.
    #[error("Storage unavailable at {path:?}: {reason}")]
    Unavailable { path: PathBuf, reason: String },

    #[error("State not found: file {file_id} for user {user:?}")]
    StateNotFound { user: String, file_id: FileId },

    /// Absence of a config record. `Store::config` turns this into the
    /// default configuration, so callers of that method never see it.
    #[error("Configuration not found for user {user:?}")]
    ConfigNotFound { user: String },

    /// The user's namespaces were never created with `create_buckets`.
    #[error("User namespace not provisioned: {user:?}")]
    UserNotProvisioned { user: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Host account or home directory could not be resolved.
    #[error("Environment error: {0}")]
    Environment(String),

    #[error("Store is not open")]
    Closed,

    #[error("Storage engine error: {0}")]
    Engine(#[from] sled::Error),

    #[error("User identifier is empty")]
    EmptyUser,

    #[error("Logging error: {0}")]
    Logging(String),

    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Whether the caller may reasonably retry the operation later.
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Unavailable { .. })
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, StoreError>;
