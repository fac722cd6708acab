//! # Payload Serialization
//!
//! The framer only deals in bytes. Typed values reach it through a
//! [`PayloadSerializer`], anything that can turn a value into bytes and back
//! deterministically. [`JsonSerializer`] is the stock implementation.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

/// Converts typed values to payload bytes and back.
pub trait PayloadSerializer {
    fn to_bytes<T: Serialize>(&self, value: &T) -> Result<Vec<u8>>;

    fn from_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;
}

/// Compact JSON via `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl PayloadSerializer for JsonSerializer {
    fn to_bytes<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(value)?)
    }

    fn from_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
