//! RPC Module
//!
//! Client-side contracts a data service uses to reach its cache and storage
//! peers, with in-process and HTTP implementations.
//!
//! # Contracts
//! - Cache: `get_item`, `set_item`, `delete_item`
//! - Storage: `get_record`, `set_record`, `delete_record`
//!
//! A missing key is `WelpError::NotFound`; any other failure to reach or be
//! served by the peer is `WelpError::Transport`.

mod cache_client;
mod http;
mod storage_client;

use async_trait::async_trait;

use crate::cache::CacheItem;
use crate::error::Result;
use crate::storage::DatabaseRecord;

pub use cache_client::{HttpCacheClient, LocalCacheClient};
pub use http::HttpPeer;
pub use storage_client::{HttpStorageClient, LocalStorageClient};

#[async_trait]
pub trait CacheClient: Send + Sync {
    async fn get_item(&self, key: &str) -> Result<CacheItem>;
    async fn set_item(&self, item: CacheItem) -> Result<()>;
    async fn delete_item(&self, key: &str) -> Result<()>;
}

#[async_trait]
pub trait StorageClient: Send + Sync {
    async fn get_record(&self, key: &str) -> Result<DatabaseRecord>;
    async fn set_record(&self, record: DatabaseRecord) -> Result<()>;
    async fn delete_record(&self, key: &str) -> Result<()>;
}
