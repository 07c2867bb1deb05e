//! Key-value store abstraction used by dictionary and session persistence.
//!
//! The core never depends on a concrete storage mechanism; everything goes
//! through the object-safe [`KeyValueStore`] trait over raw JSON strings,
//! with typed helpers layered on top. [`MemoryStore`] is the in-process
//! implementation used by tests and headless embedding.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::RwLock;

/// An opaque external key-value store.
///
/// Values are opaque strings (JSON by convention). Implementations decide
/// durability and transport; the core only requires these four operations.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

/// Reads and deserializes a JSON value. Absent keys and corrupt payloads
/// both yield `None` - a missing session must never take detection down.
pub fn get_json<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Result<Option<T>> {
    match store.get(key)? {
        Some(json) if !json.is_empty() => match serde_json::from_str(&json) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Discarding corrupt value under '{key}': {e}");
                Ok(None)
            }
        },
        _ => Ok(None),
    }
}

/// Serializes a value as JSON and writes it under `key`.
pub fn set_json<T: Serialize>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<()> {
    let json = serde_json::to_string(value)?;
    store.set(key, &json)
}

/// An in-memory `KeyValueStore` backed by a `RwLock`-guarded map.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().expect("store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().expect("store lock poisoned").get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .expect("store lock poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().expect("store lock poisoned").remove(key);
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        self.entries.write().expect("store lock poisoned").clear();
        Ok(())
    }
}
