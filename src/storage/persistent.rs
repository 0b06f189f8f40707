//! Persistent Store
//!
//! Records persisted as one JSON object (key → record). Every write rewrites
//! the whole file while holding the lock, so writers queue rather than
//! interleave on disk. Cost is O(n) per write.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::error::{Result, WelpError};
use crate::storage::{DatabaseRecord, RecordStore};

#[derive(Debug)]
pub struct PersistentStore {
    data: Mutex<HashMap<String, DatabaseRecord>>,
    path: PathBuf,
}

impl PersistentStore {
    /// Loads the snapshot at `path`, creating an empty file if it is absent.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !tokio::fs::try_exists(&path).await.map_err(io_error)? {
            tokio::fs::File::create(&path).await.map_err(io_error)?;
        }

        let raw = tokio::fs::read(&path).await.map_err(io_error)?;
        let data: HashMap<String, DatabaseRecord> = if raw.iter().all(u8::is_ascii_whitespace) {
            HashMap::new()
        } else {
            serde_json::from_slice(&raw)?
        };
        info!("loaded {} records from {}", data.len(), path.display());

        Ok(Self {
            data: Mutex::new(data),
            path,
        })
    }

    /// Writes the full map to a sibling temp file, then renames it over the
    /// snapshot so a crash never leaves a half-written file.
    async fn save(&self, data: &HashMap<String, DatabaseRecord>) -> Result<()> {
        let bytes = serde_json::to_vec(data)?;
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");

        tokio::fs::write(&tmp, &bytes).await.map_err(io_error)?;
        tokio::fs::rename(&tmp, &self.path).await.map_err(io_error)?;
        Ok(())
    }

    async fn persist(&self, data: &HashMap<String, DatabaseRecord>) -> Result<()> {
        self.save(data).await.inspect_err(|err| {
            error!("error saving records to {}: {}", self.path.display(), err);
        })
    }
}

fn io_error(err: std::io::Error) -> WelpError {
    WelpError::Internal(err.to_string())
}

#[async_trait]
impl RecordStore for PersistentStore {
    async fn get(&self, key: &str) -> Result<Option<DatabaseRecord>> {
        Ok(self.data.lock().await.get(key).cloned())
    }

    async fn set(&self, record: DatabaseRecord) -> Result<()> {
        let mut data = self.data.lock().await;
        data.insert(record.key.clone(), record);
        self.persist(&data).await
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut data = self.data.lock().await;
        if data.remove(key).is_some() {
            self.persist(&data).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_open_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        let store = PersistentStore::open(&path).await.unwrap();
        assert!(path.exists());
        assert!(store.get("anything").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_empty_file_is_empty_map() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let store = PersistentStore::open(file.path()).await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_record_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        let record = DatabaseRecord::new("restaurant", vec![0, 159, 146, 150]);

        {
            let store = PersistentStore::open(&path).await.unwrap();
            store.set(record.clone()).await.unwrap();
        }

        let reopened = PersistentStore::open(&path).await.unwrap();
        assert_eq!(reopened.get("restaurant").await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_delete_is_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        let store = PersistentStore::open(&path).await.unwrap();
        store.set(DatabaseRecord::new("a", b"1".to_vec())).await.unwrap();
        store.set(DatabaseRecord::new("b", b"2".to_vec())).await.unwrap();
        store.delete("a").await.unwrap();
        drop(store);

        let reopened = PersistentStore::open(&path).await.unwrap();
        assert!(reopened.get("a").await.unwrap().is_none());
        assert!(reopened.get("b").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_file_is_json_object_of_records() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");

        let store = PersistentStore::open(&path).await.unwrap();
        store.set(DatabaseRecord::new("k", b"v".to_vec())).await.unwrap();

        let raw = std::fs::read(&path).unwrap();
        let json: serde_json::Value = serde_json::from_slice(&raw).unwrap();
        assert_eq!(json["k"]["key"], "k");
        assert!(json["k"]["value"].is_array());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), b"{ not json").unwrap();

        let result = PersistentStore::open(file.path()).await;
        assert!(matches!(result, Err(WelpError::Serialization(_))));
    }

    #[tokio::test]
    async fn test_concurrent_writers_all_land() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.json");
        let store = Arc::new(PersistentStore::open(&path).await.unwrap());

        let tasks: Vec<_> = (0..16)
            .map(|i| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .set(DatabaseRecord::new(format!("k{}", i), vec![i as u8]))
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }
        drop(store);

        let reopened = PersistentStore::open(&path).await.unwrap();
        for i in 0..16 {
            assert!(reopened.get(&format!("k{}", i)).await.unwrap().is_some());
        }
    }
}
