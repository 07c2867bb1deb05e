//! Work-session state and its persistence over the key-value store, so a
//! caller can resume an interrupted mask/restore workflow.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::keyword_match::DetectedKeyword;
use crate::storage::{self, KeyValueStore};

/// Storage key under which the work session is persisted.
pub const SESSION_STORAGE_KEY: &str = "pmk_work_session";

/// Direction of the current workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WorkMode {
    #[default]
    Mask,
    Restore,
}

/// Snapshot of one masking or restoration workflow: the input text, the
/// detection result (with its selection flags), and the produced output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkSession {
    pub session_id: Uuid,
    pub mode: WorkMode,
    pub source_text: String,
    pub detected_keywords: Vec<DetectedKeyword>,
    pub result_text: String,
    pub last_updated: DateTime<Utc>,
}

impl WorkSession {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            mode: WorkMode::Mask,
            source_text: String::new(),
            detected_keywords: Vec::new(),
            result_text: String::new(),
            last_updated: Utc::now(),
        }
    }

    /// Bumps the modification timestamp.
    pub fn touch(&mut self) {
        self.last_updated = Utc::now();
    }

    /// Persists the session as JSON.
    pub fn save(&self, store: &dyn KeyValueStore) -> Result<()> {
        storage::set_json(store, SESSION_STORAGE_KEY, self)?;
        debug!("Work session {} saved", self.session_id);
        Ok(())
    }

    /// Loads the persisted session, if any. Corrupt data degrades to `None`.
    pub fn load(store: &dyn KeyValueStore) -> Result<Option<Self>> {
        storage::get_json(store, SESSION_STORAGE_KEY)
    }

    /// Removes the persisted session.
    pub fn clear(store: &dyn KeyValueStore) -> Result<()> {
        store.remove(SESSION_STORAGE_KEY)
    }
}

impl Default for WorkSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    #[test]
    fn save_and_load_round_trip() {
        let store = MemoryStore::new();
        let mut session = WorkSession::new();
        session.mode = WorkMode::Restore;
        session.source_text = "T001 shipped".to_string();
        session.save(&store).unwrap();

        let loaded = WorkSession::load(&store).unwrap().expect("session present");
        assert_eq!(loaded, session);
    }

    #[test]
    fn load_without_saved_session_is_none() {
        let store = MemoryStore::new();
        assert!(WorkSession::load(&store).unwrap().is_none());
    }

    #[test]
    fn clear_removes_the_session() {
        let store = MemoryStore::new();
        WorkSession::new().save(&store).unwrap();
        WorkSession::clear(&store).unwrap();
        assert!(WorkSession::load(&store).unwrap().is_none());
    }
}
