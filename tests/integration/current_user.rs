use crate::support::open_store;

#[test]
fn fresh_database_has_no_current_user() {
    let (_temp_dir, store) = open_store();
    assert_eq!(store.current_user().unwrap(), "");
}

#[test]
fn current_user_is_overwritten_on_each_login() {
    let (_temp_dir, store) = open_store();
    store.save_current_user("alice").unwrap();
    assert_eq!(store.current_user().unwrap(), "alice");

    store.save_current_user("bob").unwrap();
    assert_eq!(store.current_user().unwrap(), "bob");
}

#[test]
fn current_user_does_not_require_provisioning() {
    let (_temp_dir, store) = open_store();
    store.save_current_user("never-provisioned").unwrap();
    assert!(!store.is_provisioned("never-provisioned").unwrap());
    assert_eq!(store.current_user().unwrap(), "never-provisioned");
}

#[test]
fn user_named_defaults_does_not_clobber_globals() {
    let (_temp_dir, store) = open_store();
    store.save_current_user("alice").unwrap();
    store.create_buckets("defaults").unwrap();
    store
        .save_config(&store.default_config().unwrap(), "defaults")
        .unwrap();
    assert_eq!(store.current_user().unwrap(), "alice");
}
