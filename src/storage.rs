//! Local key-value persistence for the background host.
//!
//! Mirrors the extension's local storage area: string keys mapping to JSON
//! values, last write wins.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Storage serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("Storage file {0} does not hold a JSON object")]
    NotAnObject(PathBuf),
}

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// Serializes `value` and writes it under `key`.
pub async fn put<T: Serialize + ?Sized>(
    store: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    store.set(key, serde_json::to_value(value)?).await
}

/// Reads and deserializes the value under `key`, if any.
pub async fn fetch<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key).await? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

#[derive(Debug, Default)]
pub struct MemoryStore {
    items: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        Ok(self.items.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        self.items.write().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.items.write().await.remove(key);
        Ok(())
    }
}

/// Store backed by a single JSON object file.
///
/// Every write rewrites the whole file through a sibling temp file and a
/// rename, so readers never observe a half-written object.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.clone(),
            source,
        }
    }

    async fn read_all(&self) -> Result<Map<String, Value>, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(self.io_error(e)),
        };

        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str(&content)? {
            Value::Object(map) => Ok(map),
            _ => Err(StoreError::NotAnObject(self.path.clone())),
        }
    }

    async fn write_all(&self, items: &Map<String, Value>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let data = serde_json::to_vec_pretty(items)?;
        let tmp_path = self.path.with_extension("tmp");
        tokio::fs::write(&tmp_path, data)
            .await
            .map_err(|e| self.io_error(e))?;
        tokio::fs::rename(&tmp_path, &self.path)
            .await
            .map_err(|e| self.io_error(e))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let _guard = self.lock.lock().await;
        Ok(self.read_all().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        items.insert(key.to_string(), value);
        self.write_all(&items).await
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let mut items = self.read_all().await?;
        if items.remove(key).is_some() {
            self.write_all(&items).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn memory_store_last_write_wins() {
        let store = MemoryStore::new();
        store.set("uploadStatus", json!({"status": "processing"})).await.unwrap();
        store.set("uploadStatus", json!({"status": "completed"})).await.unwrap();

        assert_eq!(
            store.get("uploadStatus").await.unwrap(),
            Some(json!({"status": "completed"}))
        );

        store.remove("uploadStatus").await.unwrap();
        assert_eq!(store.get("uploadStatus").await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileStore::new(&path);
        assert_eq!(store.get("walletState").await.unwrap(), None);
        store.set("walletState", json!({"isConnected": true})).await.unwrap();
        store.set("uploadStatus", json!({"progress": 33})).await.unwrap();

        let reopened = FileStore::new(&path);
        assert_eq!(
            reopened.get("walletState").await.unwrap(),
            Some(json!({"isConnected": true}))
        );

        reopened.remove("walletState").await.unwrap();
        assert_eq!(store.get("walletState").await.unwrap(), None);
        assert_eq!(
            store.get("uploadStatus").await.unwrap(),
            Some(json!({"progress": 33}))
        );
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn typed_helpers_round_trip_through_json() {
        let store = MemoryStore::new();
        put(&store, "walletState", &json!({"isConnected": false}))
            .await
            .unwrap();

        let value: Option<Value> = fetch(&store, "walletState").await.unwrap();
        assert_eq!(value, Some(json!({"isConnected": false})));

        let missing: Option<Value> = fetch(&store, "uploadStatus").await.unwrap();
        assert!(missing.is_none());

        store.set("uploadStatus", json!("not a record")).await.unwrap();
        let wrong: Result<Option<Vec<u8>>, _> = fetch(&store, "uploadStatus").await;
        assert!(matches!(wrong, Err(StoreError::Serde(_))));
    }

    #[tokio::test]
    async fn file_store_rejects_non_object_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        tokio::fs::write(&path, "[1, 2, 3]").await.unwrap();

        let store = FileStore::new(&path);
        assert!(matches!(
            store.get("uploadStatus").await,
            Err(StoreError::NotAnObject(_))
        ));
    }
}
