//! Key-value persistence

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
    /// Deserialization error
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

/// String-keyed integers and strings that outlive a session.
///
/// Reads never fail: a missing key yields the caller's default.
pub trait Persistence: Send + Sync {
    fn get_int(&self, key: &str, default: i32) -> i32;
    fn set_int(&self, key: &str, value: i32);
    fn get_string(&self, key: &str, default: &str) -> String;
    fn set_string(&self, key: &str, value: &str);
    fn has_key(&self, key: &str) -> bool;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    ints: BTreeMap<String, i32>,
    #[serde(default)]
    strings: BTreeMap<String, String>,
}

/// In-memory [`Persistence`] with JSON snapshots
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: RwLock<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_int(self, key: &str, value: i32) -> Self {
        self.set_int(key, value);
        self
    }

    pub fn with_string(self, key: &str, value: &str) -> Self {
        self.set_string(key, value);
        self
    }

    /// Remove every key
    pub fn clear(&self) {
        *self.data.write() = StoreData::default();
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&*self.data.read())
            .map_err(|e| StoreError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let data: StoreData =
            serde_json::from_str(json).map_err(|e| StoreError::Deserialization(e.to_string()))?;
        Ok(Self {
            data: RwLock::new(data),
        })
    }
}

impl Persistence for MemoryStore {
    fn get_int(&self, key: &str, default: i32) -> i32 {
        self.data.read().ints.get(key).copied().unwrap_or(default)
    }

    fn set_int(&self, key: &str, value: i32) {
        log::trace!("Persist {key} = {value}");
        self.data.write().ints.insert(key.to_string(), value);
    }

    fn get_string(&self, key: &str, default: &str) -> String {
        self.data
            .read()
            .strings
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.to_string())
    }

    fn set_string(&self, key: &str, value: &str) {
        log::trace!("Persist {key} = {value:?}");
        self.data
            .write()
            .strings
            .insert(key.to_string(), value.to_string());
    }

    fn has_key(&self, key: &str) -> bool {
        let data = self.data.read();
        data.ints.contains_key(key) || data.strings.contains_key(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keys;

    #[test]
    fn test_defaults_for_missing_keys() {
        let store = MemoryStore::new();
        assert_eq!(store.get_int(keys::HEALTH, 2), 2);
        assert_eq!(store.get_string(keys::SHELL, "NoShell"), "NoShell");
        assert!(!store.has_key(keys::HEALTH));
    }

    #[test]
    fn test_set_and_get() {
        let store = MemoryStore::new().with_int(keys::COINS, 7);
        store.set_string(keys::SHELL, "SnailShell");

        assert_eq!(store.get_int(keys::COINS, 0), 7);
        assert_eq!(store.get_string(keys::SHELL, ""), "SnailShell");
        assert!(store.has_key(keys::SHELL));

        store.clear();
        assert!(!store.has_key(keys::COINS));
    }

    #[test]
    fn test_json_snapshot() {
        let store = MemoryStore::new()
            .with_int(keys::ARMOR, 1)
            .with_string(keys::SHELL, "ConchShell");

        let json = store.to_json().unwrap();
        let restored = MemoryStore::from_json(&json).unwrap();
        assert_eq!(restored.get_int(keys::ARMOR, 0), 1);
        assert_eq!(restored.get_string(keys::SHELL, ""), "ConchShell");

        assert!(matches!(
            MemoryStore::from_json("not json"),
            Err(StoreError::Deserialization(_))
        ));
    }
}
