//! Record encoding.
//!
//! Records are stored as self-describing JSON so fields can be added without
//! breaking data written by older versions.

use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub fn encode<T: Serialize>(record: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(record)?)
}

pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    Ok(serde_json::from_slice(bytes)?)
}
