//! Storage tier clients.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{Result, WelpError};
use crate::models::SuccessResponse;
use crate::rpc::{HttpPeer, StorageClient};
use crate::storage::{DatabaseRecord, RecordStore};

// == Local Storage Client ==
/// Talks to a record store living in the same process. An absent record
/// becomes `NotFound`, matching what the storage service answers.
#[derive(Clone)]
pub struct LocalStorageClient {
    store: Arc<dyn RecordStore>,
}

impl LocalStorageClient {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl StorageClient for LocalStorageClient {
    async fn get_record(&self, key: &str) -> Result<DatabaseRecord> {
        self.store
            .get(key)
            .await?
            .ok_or_else(|| WelpError::NotFound(key.to_string()))
    }

    async fn set_record(&self, record: DatabaseRecord) -> Result<()> {
        self.store.set(record).await
    }

    async fn delete_record(&self, key: &str) -> Result<()> {
        self.store.delete(key).await
    }
}

// == Http Storage Client ==
/// Talks to a storage service over `/records`.
#[derive(Debug, Clone)]
pub struct HttpStorageClient {
    peer: HttpPeer,
}

impl HttpStorageClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            peer: HttpPeer::new(base_url)?,
        })
    }
}

#[async_trait]
impl StorageClient for HttpStorageClient {
    async fn get_record(&self, key: &str) -> Result<DatabaseRecord> {
        self.peer.get(&["records", key]).await
    }

    async fn set_record(&self, record: DatabaseRecord) -> Result<()> {
        let _: SuccessResponse = self.peer.put(&["records"], &record).await?;
        Ok(())
    }

    async fn delete_record(&self, key: &str) -> Result<()> {
        let _: SuccessResponse = self.peer.delete(&["records", key]).await?;
        Ok(())
    }
}
