use std::path::PathBuf;

use syncstore::{DownloadState, Store};
use tempfile::TempDir;

pub const USER: &str = "alice";

/// An open store in a fresh temporary directory. Keep the `TempDir` alive
/// for as long as the store is used.
pub fn open_store() -> (TempDir, Store) {
    let temp_dir = TempDir::new().unwrap();
    let store = Store::open_at(db_path(&temp_dir)).unwrap();
    (temp_dir, store)
}

/// Like [`open_store`] with `USER` already provisioned.
pub fn open_provisioned_store() -> (TempDir, Store) {
    let (temp_dir, store) = open_store();
    store.create_buckets(USER).unwrap();
    (temp_dir, store)
}

pub fn db_path(temp_dir: &TempDir) -> PathBuf {
    temp_dir.path().join("sync.db")
}

pub fn state(file_id: i64, hidden: bool) -> DownloadState {
    let mut state = DownloadState::new(file_id, format!("file-{}.bin", file_id));
    state.is_hidden = hidden;
    state
}

pub fn ids(states: &[DownloadState]) -> Vec<i64> {
    states.iter().map(|s| s.file_id).collect()
}
