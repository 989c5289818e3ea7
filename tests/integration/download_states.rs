use chrono::Utc;
use syncstore::{DownloadState, DownloadStatus, StoreError};

use crate::support::{ids, open_provisioned_store, open_store, state, USER};

#[test]
fn saved_state_roundtrips() {
    let (_temp_dir, store) = open_provisioned_store();

    let mut saved = DownloadState::new(4242, "archive.tar.gz");
    saved.size = 10_000;
    saved.downloaded = 2_500;
    saved.status = DownloadStatus::Downloading;
    saved.local_path = Some("/downloads/archive.tar.gz".into());
    saved.created_at = Some(Utc::now());
    saved.updated_at = Some(Utc::now());
    store.save_state(&saved, USER).unwrap();

    assert_eq!(store.state(4242, USER).unwrap(), saved);
}

#[test]
fn save_state_overwrites_existing_record() {
    let (_temp_dir, store) = open_provisioned_store();

    let mut record = state(7, false);
    store.save_state(&record, USER).unwrap();
    record.status = DownloadStatus::Completed;
    record.downloaded = 99;
    store.save_state(&record, USER).unwrap();

    let fetched = store.state(7, USER).unwrap();
    assert_eq!(fetched.status, DownloadStatus::Completed);
    assert_eq!(store.states(USER).unwrap().len(), 1);
}

#[test]
fn missing_state_is_not_found() {
    let (_temp_dir, store) = open_provisioned_store();
    store.save_state(&state(1, false), USER).unwrap();

    let err = store.state(99, USER).unwrap_err();
    assert!(
        matches!(err, StoreError::StateNotFound { file_id: 99, ref user } if user == USER),
        "got {:?}",
        err
    );
}

#[test]
fn listing_skips_hidden_states() {
    let (_temp_dir, store) = open_provisioned_store();
    store.save_state(&state(1, false), USER).unwrap();
    store.save_state(&state(2, true), USER).unwrap();
    store.save_state(&state(3, false), USER).unwrap();

    assert_eq!(ids(&store.states(USER).unwrap()), vec![1, 3]);
    // Hidden records are still retrievable directly.
    assert!(store.state(2, USER).unwrap().is_hidden);
}

#[test]
fn listing_is_in_ascending_id_order() {
    let (_temp_dir, store) = open_provisioned_store();
    for id in [5, 1, 3] {
        store.save_state(&state(id, false), USER).unwrap();
    }
    assert_eq!(ids(&store.states(USER).unwrap()), vec![1, 3, 5]);
}

#[test]
fn listing_orders_negative_and_large_ids_numerically() {
    let (_temp_dir, store) = open_provisioned_store();
    for id in [300, -2, i64::MAX, 0, i64::MIN, 256, -300] {
        store.save_state(&state(id, false), USER).unwrap();
    }
    assert_eq!(
        ids(&store.states(USER).unwrap()),
        vec![i64::MIN, -300, -2, 0, 256, 300, i64::MAX]
    );
}

#[test]
fn empty_user_lists_nothing() {
    let (_temp_dir, store) = open_provisioned_store();
    store.save_state(&state(1, false), USER).unwrap();
    assert!(store.states("").unwrap().is_empty());
}

#[test]
fn states_are_scoped_per_user() {
    let (_temp_dir, store) = open_provisioned_store();
    store.create_buckets("bob").unwrap();
    store.save_state(&state(1, false), USER).unwrap();
    store.save_state(&state(2, false), "bob").unwrap();

    assert_eq!(ids(&store.states(USER).unwrap()), vec![1]);
    assert_eq!(ids(&store.states("bob").unwrap()), vec![2]);
    assert!(matches!(
        store.state(2, USER),
        Err(StoreError::StateNotFound { .. })
    ));
}

#[test]
fn unprovisioned_user_is_rejected() {
    let (_temp_dir, store) = open_store();

    let err = store.save_state(&state(1, false), "ghost").unwrap_err();
    assert!(matches!(err, StoreError::UserNotProvisioned { .. }));
    assert!(matches!(
        store.state(1, "ghost"),
        Err(StoreError::UserNotProvisioned { .. })
    ));
    assert!(matches!(
        store.states("ghost"),
        Err(StoreError::UserNotProvisioned { .. })
    ));
}
