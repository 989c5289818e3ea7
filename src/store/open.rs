//! Exclusive database open with a bounded wait for the file lock.

use crate::error::{Result, StoreError};
use std::io;
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default wait for a lock held by another handle or process.
pub const DEFAULT_OPEN_TIMEOUT: Duration = Duration::from_secs(10);

const INITIAL_RETRY_DELAY: Duration = Duration::from_millis(20);
const MAX_RETRY_DELAY: Duration = Duration::from_millis(500);

/// sled reports a held lock as a plain IO error carrying this message.
fn is_lock_contention(err: &io::Error) -> bool {
    err.kind() == io::ErrorKind::WouldBlock || err.to_string().contains("could not acquire")
}

/// Open the database at `path`, retrying while its lock is held elsewhere.
///
/// Any other failure (permissions, corrupt files) is reported immediately.
pub(crate) fn open_with_timeout(path: &Path, timeout: Duration) -> Result<sled::Db> {
    let started = Instant::now();
    let deadline = started + timeout;
    let mut delay = INITIAL_RETRY_DELAY;
    let mut warned = false;

    loop {
        match sled::Config::new().path(path).open() {
            Ok(db) => {
                debug!(path = %path.display(), waited_ms = started.elapsed().as_millis() as u64, "database opened");
                return Ok(db);
            }
            Err(sled::Error::Io(e)) if is_lock_contention(&e) => {
                let now = Instant::now();
                if now >= deadline {
                    return Err(StoreError::Unavailable {
                        path: path.to_path_buf(),
                        reason: format!("timed out after {:?} waiting for lock: {}", timeout, e),
                    });
                }
                if !warned {
                    warn!(path = %path.display(), "database is locked, waiting");
                    warned = true;
                }
                std::thread::sleep(delay.min(deadline - now));
                delay = (delay * 2).min(MAX_RETRY_DELAY);
            }
            Err(e) => {
                return Err(StoreError::Unavailable {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                })
            }
        }
    }
}
