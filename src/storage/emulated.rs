//! Emulated Store
//!
//! In-memory records behind a lock. Every operation first sleeps for the
//! device latency, outside the lock, so callers are delayed without being
//! serialized by the sleep.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use crate::error::{Result, WelpError};
use crate::storage::{DatabaseRecord, DeviceType, RecordStore};

#[derive(Debug)]
pub struct EmulatedStore {
    data: Mutex<HashMap<String, DatabaseRecord>>,
    device: DeviceType,
}

impl EmulatedStore {
    pub fn new(device: DeviceType) -> Self {
        info!("device type: {} ({:?} per operation)", device, device.latency());
        Self {
            data: Mutex::new(HashMap::new()),
            device,
        }
    }

    async fn emulate_latency(&self) {
        tokio::time::sleep(self.device.latency()).await;
    }

    fn data(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, DatabaseRecord>>> {
        self.data
            .lock()
            .map_err(|_| WelpError::Internal("storage lock poisoned".to_string()))
    }
}

#[async_trait]
impl RecordStore for EmulatedStore {
    async fn get(&self, key: &str) -> Result<Option<DatabaseRecord>> {
        self.emulate_latency().await;
        Ok(self.data()?.get(key).cloned())
    }

    async fn set(&self, record: DatabaseRecord) -> Result<()> {
        self.emulate_latency().await;
        self.data()?.insert(record.key.clone(), record);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        self.emulate_latency().await;
        self.data()?.remove(key);
        Ok(())
    }
}
