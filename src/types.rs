//! Core types shared across the store.

/// FileId: remote file identifier, unique within one user's namespace
pub type FileId = i64;
