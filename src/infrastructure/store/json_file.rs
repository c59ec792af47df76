//! JSON file key-value store adapter

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::warn;

use crate::application::ports::{KeyValueStore, StoreError};

/// Persists the whole key-value map as one JSON object file under the
/// XDG data directory. A corrupted file is logged and treated as empty so
/// the assistant keeps running.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store at the default XDG data path
    pub fn new() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("voice-assist");

        Self {
            path: data_dir.join("store.json"),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.path.clone()
    }

    async fn read_map(&self) -> Result<HashMap<String, String>, StoreError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let content = fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::ReadFailed(e.to_string()))?;
        match serde_json::from_str(&content) {
            Ok(map) => Ok(map),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "store file corrupted, starting empty");
                Ok(HashMap::new())
            }
        }
    }
}

impl Default for JsonFileStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let map = self.read_map().await?;
        Ok(map.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        }

        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value.to_string());

        let content = serde_json::to_string_pretty(&map)
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
        fs::write(&self.path, content)
            .await
            .map_err(|e| StoreError::WriteFailed(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_path_is_under_data_dir() {
        let store = JsonFileStore::new();
        let path = store.path();
        assert!(path.to_string_lossy().contains("voice-assist"));
        assert!(path.to_string_lossy().contains("store.json"));
    }

    #[tokio::test]
    async fn get_from_missing_file_is_none() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::with_path(dir.path().join("store.json"));
        assert_eq!(store.get("key").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_then_get_round_trips() {
        let dir = tempdir().unwrap();
        let store = JsonFileStore::with_path(dir.path().join("store.json"));

        store.set("alpha", "1").await.unwrap();
        store.set("beta", "2").await.unwrap();

        assert_eq!(store.get("alpha").await.unwrap(), Some("1".to_string()));
        assert_eq!(store.get("beta").await.unwrap(), Some("2".to_string()));
    }

    #[tokio::test]
    async fn values_survive_a_new_store_instance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");

        JsonFileStore::with_path(&path)
            .set("key", "persisted")
            .await
            .unwrap();

        let reopened = JsonFileStore::with_path(&path);
        assert_eq!(
            reopened.get("key").await.unwrap(),
            Some("persisted".to_string())
        );
    }

    #[tokio::test]
    async fn corrupted_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("store.json");
        tokio::fs::write(&path, "{{{not json").await.unwrap();

        let store = JsonFileStore::with_path(&path);
        assert_eq!(store.get("key").await.unwrap(), None);

        // And a write recovers the file
        store.set("key", "value").await.unwrap();
        assert_eq!(store.get("key").await.unwrap(), Some("value".to_string()));
    }
}
