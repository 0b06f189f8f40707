//! Cache tier clients.

use async_trait::async_trait;

use crate::cache::{CacheItem, SharedCacheStore};
use crate::error::Result;
use crate::models::SuccessResponse;
use crate::rpc::{CacheClient, HttpPeer};

// == Local Cache Client ==
/// Talks to a cache store living in the same process.
#[derive(Debug, Clone)]
pub struct LocalCacheClient {
    store: SharedCacheStore,
}

impl LocalCacheClient {
    pub fn new(store: SharedCacheStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &SharedCacheStore {
        &self.store
    }
}

#[async_trait]
impl CacheClient for LocalCacheClient {
    async fn get_item(&self, key: &str) -> Result<CacheItem> {
        self.store.lock().await.get(key)
    }

    async fn set_item(&self, item: CacheItem) -> Result<()> {
        self.store.lock().await.set(item);
        Ok(())
    }

    async fn delete_item(&self, key: &str) -> Result<()> {
        self.store.lock().await.delete(key)
    }
}

// == Http Cache Client ==
/// Talks to a cache service over `/items`.
#[derive(Debug, Clone)]
pub struct HttpCacheClient {
    peer: HttpPeer,
}

impl HttpCacheClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            peer: HttpPeer::new(base_url)?,
        })
    }
}

#[async_trait]
impl CacheClient for HttpCacheClient {
    async fn get_item(&self, key: &str) -> Result<CacheItem> {
        self.peer.get(&["items", key]).await
    }

    async fn set_item(&self, item: CacheItem) -> Result<()> {
        let _: SuccessResponse = self.peer.put(&["items"], &item).await?;
        Ok(())
    }

    async fn delete_item(&self, key: &str) -> Result<()> {
        let _: SuccessResponse = self.peer.delete(&["items", key]).await?;
        Ok(())
    }
}
