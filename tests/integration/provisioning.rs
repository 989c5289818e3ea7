use std::time::Duration;

use syncstore::{Store, StoreError};

use crate::support::{db_path, ids, open_store, state, USER};

#[test]
fn create_buckets_is_idempotent() {
    let (_temp_dir, store) = open_store();
    assert!(!store.is_provisioned(USER).unwrap());

    store.create_buckets(USER).unwrap();
    store.save_state(&state(1, false), USER).unwrap();
    let mut cfg = store.default_config().unwrap();
    cfg.is_paused = false;
    store.save_config(&cfg, USER).unwrap();

    store.create_buckets(USER).unwrap();

    assert!(store.is_provisioned(USER).unwrap());
    assert_eq!(ids(&store.states(USER).unwrap()), vec![1]);
    assert_eq!(store.config(USER).unwrap(), cfg);
}

#[test]
fn empty_user_cannot_be_provisioned() {
    let (_temp_dir, store) = open_store();
    assert!(matches!(store.create_buckets(""), Err(StoreError::EmptyUser)));
    assert!(!store.is_provisioned("").unwrap());
}

#[test]
fn watched_torrents_namespace_is_available_after_provisioning() {
    let (_temp_dir, store) = open_store();
    assert!(matches!(
        store.with_watched_torrents(USER, |_| Ok(())),
        Err(StoreError::UserNotProvisioned { .. })
    ));

    store.create_buckets(USER).unwrap();
    let was_empty = store.with_watched_torrents(USER, |tree| Ok(tree.is_empty())).unwrap();
    assert!(was_empty);

    store
        .with_watched_torrents(USER, |tree| {
            tree.insert(b"ubuntu.torrent", b"seen".to_vec())?;
            Ok(())
        })
        .unwrap();
    // Provisioning again must not wipe the watcher's entries.
    store.create_buckets(USER).unwrap();
    let count = store.with_watched_torrents(USER, |tree| Ok(tree.len())).unwrap();
    assert_eq!(count, 1);
}

#[test]
fn close_releases_lock_after_watched_torrents_access() {
    let (temp_dir, store) = open_store();
    store.create_buckets(USER).unwrap();
    store
        .with_watched_torrents(USER, |tree| {
            tree.insert(b"debian.torrent", b"seen".to_vec())?;
            Ok(())
        })
        .unwrap();
    store.close().unwrap();

    let reopened = Store::new(db_path(&temp_dir)).with_open_timeout(Duration::from_secs(5));
    reopened.open().unwrap();
    let count = reopened.with_watched_torrents(USER, |tree| Ok(tree.len())).unwrap();
    assert_eq!(count, 1);
}
