//! Namespace naming and key encoding.
//!
//! Namespaces are sled trees. Trees do not nest, so the hierarchy is
//! flattened into tree names: a scope tag followed by length-prefixed
//! segments. Every user identifier maps to its own distinct name and can
//! never collide with a global namespace.

use crate::types::FileId;

pub const DEFAULTS: &[u8] = b"defaults";
pub const DOWNLOAD_ITEMS: &[u8] = b"download-items";
pub const WATCHED_TORRENTS: &[u8] = b"watched-torrents";

/// Child namespaces created for every user
pub const USER_CHILDREN: [&[u8]; 2] = [DOWNLOAD_ITEMS, WATCHED_TORRENTS];

pub const CURRENT_USER_KEY: &[u8] = b"current-user";
pub const CONFIG_KEY: &[u8] = b"config";

const GLOBAL_SCOPE: u8 = b'g';
const USER_SCOPE: u8 = b'u';

const SIGN_BIT: u64 = 1 << 63;

fn push_segment(name: &mut Vec<u8>, segment: &[u8]) {
    name.extend_from_slice(&(segment.len() as u32).to_be_bytes());
    name.extend_from_slice(segment);
}

/// Tree name of a process-wide namespace such as `defaults`.
pub fn global_namespace(name: &[u8]) -> Vec<u8> {
    let mut out = vec![GLOBAL_SCOPE];
    push_segment(&mut out, name);
    out
}

/// Tree name of a user's top-level namespace.
pub fn user_namespace(user: &str) -> Vec<u8> {
    let mut out = vec![USER_SCOPE];
    push_segment(&mut out, user.as_bytes());
    out
}

/// Tree name of a child namespace inside a user's namespace.
pub fn user_child_namespace(user: &str, child: &[u8]) -> Vec<u8> {
    let mut out = user_namespace(user);
    push_segment(&mut out, child);
    out
}

/// Encode a file ID as an 8-byte big-endian key with the sign bit flipped,
/// so byte order matches numeric order across the whole i64 range.
pub fn file_key(id: FileId) -> [u8; 8] {
    ((id as u64) ^ SIGN_BIT).to_be_bytes()
}

/// Inverse of [`file_key`]. Returns `None` if `key` is not 8 bytes.
pub fn decode_file_key(key: &[u8]) -> Option<FileId> {
    let bytes: [u8; 8] = key.try_into().ok()?;
    Some((u64::from_be_bytes(bytes) ^ SIGN_BIT) as i64)
}
