//! Cache-Aside Coordinator
//!
//! Read-through and write-through logic every data service runs against its
//! own cache and storage peers.
//!
//! # Read
//! cache hit → decode; cache miss (or cache unreachable) → storage → decode,
//! then populate the cache. With caching disabled the cache is never
//! consulted and every read goes to storage.
//!
//! # Write
//! storage first; the cache is written only after storage succeeded.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::CacheItem;
use crate::error::{Result, WelpError};
use crate::rpc::{CacheClient, StorageClient};
use crate::storage::DatabaseRecord;

#[derive(Clone)]
pub struct CacheAside {
    cache: Arc<dyn CacheClient>,
    storage: Arc<dyn StorageClient>,
    cache_enabled: bool,
}

impl CacheAside {
    pub fn new(
        cache: Arc<dyn CacheClient>,
        storage: Arc<dyn StorageClient>,
        cache_enabled: bool,
    ) -> Self {
        Self {
            cache,
            storage,
            cache_enabled,
        }
    }

    // == Read ==
    /// Reads and decodes the value under `key`.
    ///
    /// A payload that fails to decode is a `Serialization` error wherever it
    /// came from. Only a payload that decoded cleanly out of storage is
    /// copied into the cache.
    pub async fn read<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        if self.cache_enabled {
            match self.cache.get_item(key).await {
                Ok(item) => {
                    debug!(key, "cache hit");
                    return Ok(serde_json::from_slice(&item.value)?);
                }
                Err(WelpError::NotFound(_)) => debug!(key, "cache miss"),
                Err(err) => warn!(key, "cache unavailable, reading storage: {}", err),
            }
        }

        let record = self.storage.get_record(key).await?;
        debug!(key, "storage hit");
        let value = serde_json::from_slice(&record.value)?;
        self.populate(&record).await;
        Ok(value)
    }

    async fn populate(&self, record: &DatabaseRecord) {
        if !self.cache_enabled {
            return;
        }
        let item = CacheItem::new(record.key.clone(), record.value.clone());
        match self.cache.set_item(item).await {
            Ok(()) => debug!(key = %record.key, "cache populated"),
            Err(err) => warn!(key = %record.key, "failed to populate cache: {}", err),
        }
    }

    /// Like `read`, but an absent key yields `T::default()`.
    pub async fn read_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> Result<T> {
        match self.read(key).await {
            Err(WelpError::NotFound(_)) => Ok(T::default()),
            other => other,
        }
    }

    // == Write ==
    async fn write_raw(&self, key: &str, value: Vec<u8>) -> Result<()> {
        self.storage
            .set_record(DatabaseRecord::new(key, value.clone()))
            .await?;
        debug!(key, "storage updated");

        if self.cache_enabled {
            self.cache.set_item(CacheItem::new(key, value)).await?;
            debug!(key, "cache updated");
        }
        Ok(())
    }

    pub async fn write<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        self.write_raw(key, bytes).await
    }
}
