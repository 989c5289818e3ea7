//! Download state and configuration store
//!
//! Persists, per user, the sync agent configuration and the last known state
//! of each download, plus a pointer to the last logged-in user. Everything
//! lives in one sled database owned exclusively by the open [`Store`].
//!
//! Layout:
//! - `defaults`: global singletons (`current-user`)
//! - one namespace per user holding the `config` key, with two children:
//!   `download-items` (file ID -> [`DownloadState`]) and `watched-torrents`
//!   (owned by the torrent watcher, never written here)

pub mod codec;
pub mod keys;
mod open;

pub use open::DEFAULT_OPEN_TIMEOUT;

use crate::config::DatabaseSettings;
use crate::error::{Result, StoreError};
use crate::record::{DownloadState, SyncConfig};
use crate::types::FileId;
use parking_lot::RwLock;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

/// Persistent storage for user configuration and download states.
///
/// `Store` is `Send + Sync`; share it behind an `Arc`. Reads run against
/// sled's lock-free snapshots, and each save is a single atomic write.
pub struct Store {
    path: PathBuf,
    open_timeout: Duration,
    sync_writes: bool,
    db: RwLock<Option<sled::Db>>,
}

impl Store {
    /// Create an unopened store for the database at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            open_timeout: DEFAULT_OPEN_TIMEOUT,
            sync_writes: true,
            db: RwLock::new(None),
        }
    }

    /// How long `open` waits for a lock held by another handle.
    pub fn with_open_timeout(mut self, timeout: Duration) -> Self {
        self.open_timeout = timeout;
        self
    }

    /// Flush to disk after every write (default) or leave it to sled's
    /// background flusher.
    pub fn with_sync_writes(mut self, sync_writes: bool) -> Self {
        self.sync_writes = sync_writes;
        self
    }

    /// Build an unopened store from resolved database settings.
    pub fn from_settings(settings: &DatabaseSettings) -> Result<Self> {
        Ok(Self::new(settings.resolve_path()?)
            .with_open_timeout(settings.open_timeout())
            .with_sync_writes(settings.sync_writes))
    }

    /// Create and open a store at `path` with default options.
    pub fn open_at(path: impl Into<PathBuf>) -> Result<Self> {
        let store = Self::new(path);
        store.open()?;
        Ok(store)
    }

    /// Acquire the database handle and create the `defaults` namespace.
    ///
    /// Waits up to the open timeout if the database is locked. Opening an
    /// already open store is a no-op.
    pub fn open(&self) -> Result<()> {
        let mut guard = self.db.write();
        if guard.is_some() {
            return Ok(());
        }

        let db = open::open_with_timeout(&self.path, self.open_timeout)?;
        // On failure the handle is dropped here, releasing the lock.
        db.open_tree(keys::global_namespace(keys::DEFAULTS))?;

        info!(path = %self.path.display(), "store opened");
        *guard = Some(db);
        Ok(())
    }

    /// Flush and release the database handle. Closing twice is a no-op.
    pub fn close(&self) -> Result<()> {
        let Some(db) = self.db.write().take() else {
            return Ok(());
        };
        db.flush()?;
        info!(path = %self.path.display(), "store closed");
        Ok(())
    }

    /// Path of the database on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.db.read().is_some()
    }

    fn db(&self) -> Result<sled::Db> {
        self.db.read().clone().ok_or(StoreError::Closed)
    }

    fn persist(&self, db: &sled::Db) -> Result<()> {
        if self.sync_writes {
            db.flush()?;
        }
        Ok(())
    }

    fn tree_exists(db: &sled::Db, name: &[u8]) -> bool {
        db.tree_names().iter().any(|n| &**n == name)
    }

    /// The user's namespace, if `create_buckets` ran for it.
    fn user_tree(db: &sled::Db, user: &str) -> Result<Option<sled::Tree>> {
        if user.is_empty() {
            return Ok(None);
        }
        let name = keys::user_namespace(user);
        if !Self::tree_exists(db, &name) {
            return Ok(None);
        }
        Ok(Some(db.open_tree(name)?))
    }

    fn require_user_tree(db: &sled::Db, user: &str) -> Result<sled::Tree> {
        Self::user_tree(db, user)?.ok_or_else(|| StoreError::UserNotProvisioned {
            user: user.to_string(),
        })
    }

    fn require_child_tree(db: &sled::Db, user: &str, child: &[u8]) -> Result<sled::Tree> {
        Self::require_user_tree(db, user)?;
        Ok(db.open_tree(keys::user_child_namespace(user, child))?)
    }

    fn defaults_tree(db: &sled::Db) -> Result<sled::Tree> {
        Ok(db.open_tree(keys::global_namespace(keys::DEFAULTS))?)
    }

    /// Create the user's namespace and its child namespaces if absent.
    ///
    /// Children are created before the user namespace itself, so a visible
    /// user namespace always has both children. Existing data is untouched.
    pub fn create_buckets(&self, user: &str) -> Result<()> {
        if user.is_empty() {
            return Err(StoreError::EmptyUser);
        }
        let db = self.db()?;
        for child in keys::USER_CHILDREN {
            db.open_tree(keys::user_child_namespace(user, child))?;
        }
        db.open_tree(keys::user_namespace(user))?;
        self.persist(&db)?;
        debug!(user, "user namespaces ready");
        Ok(())
    }

    /// Whether `create_buckets` has run for `user`.
    pub fn is_provisioned(&self, user: &str) -> Result<bool> {
        let db = self.db()?;
        Ok(Self::user_tree(&db, user)?.is_some())
    }

    /// Insert or replace `state`, keyed by its file ID.
    pub fn save_state(&self, state: &DownloadState, user: &str) -> Result<()> {
        let db = self.db()?;
        let items = Self::require_child_tree(&db, user, keys::DOWNLOAD_ITEMS)?;
        let value = codec::encode(state)?;
        items.insert(keys::file_key(state.file_id), value)?;
        self.persist(&db)?;
        debug!(user, file_id = state.file_id, "download state saved");
        Ok(())
    }

    /// Fetch the state of file `id`.
    pub fn state(&self, id: FileId, user: &str) -> Result<DownloadState> {
        let db = self.db()?;
        let items = Self::require_child_tree(&db, user, keys::DOWNLOAD_ITEMS)?;
        match items.get(keys::file_key(id))? {
            Some(value) => codec::decode(&value),
            None => Err(StoreError::StateNotFound {
                user: user.to_string(),
                file_id: id,
            }),
        }
    }

    /// All visible states of `user` in ascending file ID order.
    ///
    /// Hidden states are skipped. An empty `user` yields an empty list. A
    /// record that fails to decode fails the whole listing.
    pub fn states(&self, user: &str) -> Result<Vec<DownloadState>> {
        if user.is_empty() {
            return Ok(Vec::new());
        }
        let db = self.db()?;
        let items = Self::require_child_tree(&db, user, keys::DOWNLOAD_ITEMS)?;

        let mut states = Vec::new();
        for entry in items.iter() {
            let (_, value) = entry?;
            let state: DownloadState = codec::decode(&value)?;
            if state.is_hidden {
                continue;
            }
            states.push(state);
        }
        Ok(states)
    }

    /// The stored configuration of `user`, without fallback.
    fn stored_config(&self, user: &str) -> Result<SyncConfig> {
        let db = self.db()?;
        let not_found = || StoreError::ConfigNotFound {
            user: user.to_string(),
        };
        let tree = Self::user_tree(&db, user)?.ok_or_else(not_found)?;
        let value = tree.get(keys::CONFIG_KEY)?.ok_or_else(not_found)?;
        codec::decode(&value)
    }

    /// Configuration of `user`, or the default configuration when none is
    /// stored (including for an empty or unprovisioned user).
    pub fn config(&self, user: &str) -> Result<SyncConfig> {
        if user.is_empty() {
            return self.default_config();
        }
        match self.stored_config(user) {
            Err(StoreError::ConfigNotFound { .. }) => {
                debug!(user, "no stored config, using defaults");
                self.default_config()
            }
            other => other,
        }
    }

    /// Insert or replace the configuration of `user`.
    ///
    /// The record is stored as given; callers that want the agent limits
    /// enforced run [`SyncConfig::validate`] first.
    pub fn save_config(&self, cfg: &SyncConfig, user: &str) -> Result<()> {
        let db = self.db()?;
        let tree = Self::require_user_tree(&db, user)?;
        tree.insert(keys::CONFIG_KEY, codec::encode(cfg)?)?;
        self.persist(&db)?;
        debug!(user, "config saved");
        Ok(())
    }

    /// Configuration computed from built-in defaults and the home directory.
    pub fn default_config(&self) -> Result<SyncConfig> {
        SyncConfig::defaults()
    }

    /// The last logged-in user, or an empty string if none was saved.
    pub fn current_user(&self) -> Result<String> {
        let db = self.db()?;
        let defaults = Self::defaults_tree(&db)?;
        Ok(defaults
            .get(keys::CURRENT_USER_KEY)?
            .map(|value| String::from_utf8_lossy(&value).into_owned())
            .unwrap_or_default())
    }

    /// Record `user` as the last logged-in user.
    pub fn save_current_user(&self, user: &str) -> Result<()> {
        let db = self.db()?;
        let defaults = Self::defaults_tree(&db)?;
        defaults.insert(keys::CURRENT_USER_KEY, user.as_bytes())?;
        self.persist(&db)?;
        debug!(user, "current user saved");
        Ok(())
    }

    /// Run `f` against the user's `watched-torrents` namespace. Its contents
    /// belong to the torrent watcher; the store only provisions it.
    ///
    /// A `sled::Tree` keeps the whole database alive, so the tree is only
    /// lent for the duration of `f`. Cloning it out of the closure keeps the
    /// database locked after `close`.
    pub fn with_watched_torrents<R>(
        &self,
        user: &str,
        f: impl FnOnce(&sled::Tree) -> Result<R>,
    ) -> Result<R> {
        let db = self.db()?;
        let tree = Self::require_child_tree(&db, user, keys::WATCHED_TORRENTS)?;
        let result = f(&tree)?;
        self.persist(&db)?;
        Ok(result)
    }
}

impl Drop for Store {
    fn drop(&mut self) {
        if let Some(db) = self.db.get_mut().take() {
            if let Err(e) = db.flush() {
                tracing::warn!(path = %self.path.display(), error = %e, "flush on drop failed");
            }
        }
    }
}
