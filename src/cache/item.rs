//! Cache Item Module
//!
//! The unit stored by every cache policy.

use serde::{Deserialize, Serialize};

// == Cache Item ==
/// A key plus an opaque payload. The cache never interprets `value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheItem {
    /// The cache key
    pub key: String,
    /// Serialized domain object owned by the calling service
    pub value: Vec<u8>,
}

impl CacheItem {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
