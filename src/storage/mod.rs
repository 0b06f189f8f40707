//! Storage Module
//!
//! Record stores standing in for a durable database: an in-memory store that
//! emulates device latency, and a store persisted to a JSON file.

mod device;
mod emulated;
mod persistent;
mod record;

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::config::Config;
use crate::error::Result;

pub use device::DeviceType;
pub use emulated::EmulatedStore;
pub use persistent::PersistentStore;
pub use record::DatabaseRecord;

// == Record Store ==
/// Get/Set/Delete contract shared by every storage backend.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<DatabaseRecord>>;
    async fn set(&self, record: DatabaseRecord) -> Result<()>;
    async fn delete(&self, key: &str) -> Result<()>;
}

/// Builds the backend selected by configuration: persistent when a storage
/// file is set, emulated otherwise.
pub async fn from_config(config: &Config) -> Result<Arc<dyn RecordStore>> {
    match &config.storage_file {
        Some(path) => {
            info!("storage backend: persistent file {}", path);
            Ok(Arc::new(PersistentStore::open(path).await?))
        }
        None => {
            let device: DeviceType = config.storage_device_type.parse()?;
            Ok(Arc::new(EmulatedStore::new(device)))
        }
    }
}
