//! Append-only emergency and SOS logging over the key-value store

use std::sync::Arc;

use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::warn;

use crate::application::ports::{KeyValueStore, StoreError};
use crate::domain::records::{
    Contact, EmergencyLogEntry, SosLogEntry, EMERGENCY_CONTACTS_KEY, EMERGENCY_LOG_KEY,
    SOS_LOG_KEY,
};

/// Read a JSON list stored under `key`. A missing key yields an empty
/// list; a corrupted value is logged and replaced by an empty list rather
/// than failing the append that follows.
pub async fn read_list<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> Result<Vec<T>, StoreError> {
    let Some(raw) = store.get(key).await? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(list) => Ok(list),
        Err(err) => {
            warn!(key, %err, "stored list is corrupted, starting fresh");
            Ok(Vec::new())
        }
    }
}

async fn append<T: Serialize + DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
    entry: T,
) -> Result<(), StoreError> {
    let mut list: Vec<T> = read_list(store, key).await?;
    list.push(entry);
    let raw = serde_json::to_string(&list)
        .map_err(|e| StoreError::WriteFailed(e.to_string()))?;
    store.set(key, &raw).await
}

/// Emergency call and SOS activation log, append-only.
pub struct EmergencyLogbook {
    store: Arc<dyn KeyValueStore>,
    device_name: String,
}

impl EmergencyLogbook {
    pub fn new(store: Arc<dyn KeyValueStore>, device_name: impl Into<String>) -> Self {
        Self {
            store,
            device_name: device_name.into(),
        }
    }

    /// Append one emergency call record
    pub async fn record_call(&self, number: &str, kind: &str) -> Result<(), StoreError> {
        let entry = EmergencyLogEntry {
            number: number.to_string(),
            kind: kind.to_string(),
            timestamp: Utc::now(),
            device: self.device_name.clone(),
        };
        append(self.store.as_ref(), EMERGENCY_LOG_KEY, entry).await
    }

    /// Append one SOS activation record
    pub async fn record_sos(&self) -> Result<(), StoreError> {
        let entry = SosLogEntry {
            timestamp: Utc::now(),
            device: self.device_name.clone(),
        };
        append(self.store.as_ref(), SOS_LOG_KEY, entry).await
    }

    /// The user's configured emergency contacts, in priority order
    pub async fn emergency_contacts(&self) -> Result<Vec<Contact>, StoreError> {
        read_list(self.store.as_ref(), EMERGENCY_CONTACTS_KEY).await
    }
}
