//! Key-value store port interface

use async_trait::async_trait;
use thiserror::Error;

/// Store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Failed to read from store: {0}")]
    ReadFailed(String),

    #[error("Failed to write to store: {0}")]
    WriteFailed(String),

    #[error("Stored value is corrupted: {0}")]
    Corrupted(String),
}

/// Port for simple string key-value persistence.
///
/// The logbook uses it append-style: read the list under a fixed key,
/// push, rewrite. Entries are never mutated or deleted here.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
}
