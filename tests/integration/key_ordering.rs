use std::collections::BTreeSet;

use proptest::prelude::*;
use syncstore::Store;
use tempfile::TempDir;

use crate::support::{db_path, ids, state, USER};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn listing_order_matches_numeric_order(id_list in prop::collection::vec(any::<i64>(), 1..40)) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(db_path(&temp_dir)).with_sync_writes(false);
        store.open().unwrap();
        store.create_buckets(USER).unwrap();

        for id in &id_list {
            store.save_state(&state(*id, false), USER).unwrap();
        }

        let expected: Vec<i64> = id_list.iter().copied().collect::<BTreeSet<_>>().into_iter().collect();
        prop_assert_eq!(ids(&store.states(USER).unwrap()), expected);
    }

    #[test]
    fn hidden_states_never_listed(entries in prop::collection::vec((-1000i64..1000, any::<bool>()), 1..30)) {
        let temp_dir = TempDir::new().unwrap();
        let store = Store::new(db_path(&temp_dir)).with_sync_writes(false);
        store.open().unwrap();
        store.create_buckets(USER).unwrap();

        // Later saves of the same id win.
        let mut latest = std::collections::BTreeMap::new();
        for (id, hidden) in &entries {
            store.save_state(&state(*id, *hidden), USER).unwrap();
            latest.insert(*id, *hidden);
        }

        let expected: Vec<i64> = latest.into_iter().filter(|(_, hidden)| !hidden).map(|(id, _)| id).collect();
        prop_assert_eq!(ids(&store.states(USER).unwrap()), expected);
    }
}
