//! Integration tests for the sync store

mod current_user;
mod download_states;
mod key_ordering;
mod provisioning;
mod support;
