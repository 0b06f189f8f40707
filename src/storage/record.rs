use serde::{Deserialize, Serialize};

/// Storage-tier analogue of `CacheItem`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseRecord {
    pub key: String,
    pub value: Vec<u8>,
}

impl DatabaseRecord {
    pub fn new(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}
