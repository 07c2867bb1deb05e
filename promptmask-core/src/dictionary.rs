//! Keyword dictionary management for `promptmask-core`.
//!
//! This module defines the `KeywordMapping` entity (one sensitive-term to
//! safe-alias pair) and the `KeywordDictionary` container with guarded CRUD,
//! default highlight-color cycling, YAML file loading, and persistence
//! through the [`crate::storage::KeyValueStore`] abstraction.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use crate::storage::{self, KeyValueStore};
use crate::validation::{validate_mapping, ValidationOutcome};

/// Maximum number of keyword mappings in one dictionary.
pub const MAX_KEYWORD_COUNT: usize = 500;

/// Maximum supported text length, in characters. Inputs beyond this bound
/// are rejected at the caller boundary; the engine itself does not hard-fail
/// on longer input but carries no performance guarantee past it.
pub const MAX_TEXT_LENGTH: usize = 100_000;

/// Maximum length of a sensitive or safe key, in characters.
pub const MAX_KEYWORD_LENGTH: usize = 200;

/// Storage key under which a dictionary is persisted.
pub const DICTIONARY_STORAGE_KEY: &str = "pmk_keyword_dict";

/// Default highlight palette, cycled when an entry is added without a color.
pub const DEFAULT_COLORS: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7",
    "#DDA0DD", "#98D8C8", "#F7DC6F", "#BB8FCE", "#85C1E9",
];

/// One sensitive-term to safe-alias pair.
///
/// Invariants (enforced by the dictionary guard, not by the matching
/// engine): both keys non-blank and at most [`MAX_KEYWORD_LENGTH`]
/// characters, the safe key unique case-insensitively across the dictionary,
/// neither key an exact reserved programming keyword.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeywordMapping {
    pub id: Uuid,
    pub sensitive_key: String,
    pub safe_key: String,
    /// HEX highlight color, e.g. `#FF6B6B`. Blank means "assign from the
    /// default palette on insert".
    pub highlight_color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl KeywordMapping {
    pub fn new(sensitive_key: &str, safe_key: &str) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            sensitive_key: sensitive_key.to_string(),
            safe_key: safe_key.to_string(),
            highlight_color: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.highlight_color = color.to_string();
        self
    }
}

impl Default for KeywordMapping {
    fn default() -> Self {
        Self::new("", "")
    }
}

/// An ordered collection of keyword mappings with guarded mutation.
///
/// Pattern indices handed to the matching engine are positions in this
/// collection, so iteration order is stable and meaningful.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordDictionary {
    mappings: Vec<KeywordMapping>,
    #[serde(skip)]
    color_index: usize,
}

impl KeywordDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mappings(&self) -> &[KeywordMapping] {
        &self.mappings
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    pub fn get(&self, id: Uuid) -> Option<&KeywordMapping> {
        self.mappings.iter().find(|m| m.id == id)
    }

    /// Validates and inserts a mapping. A blank highlight color is replaced
    /// with the next palette color. All guard problems are returned as data;
    /// the dictionary is only modified on success.
    pub fn add(&mut self, mut mapping: KeywordMapping) -> ValidationOutcome {
        if self.mappings.len() >= MAX_KEYWORD_COUNT {
            let message = format!("Keyword limit reached ({MAX_KEYWORD_COUNT})");
            warn!("Add rejected: {message}");
            return ValidationOutcome::failure(vec![message]);
        }

        let outcome = validate_mapping(&mapping, &self.mappings);
        if !outcome.is_valid {
            warn!("Add rejected: {}", outcome.first_error());
            return outcome;
        }

        if mapping.highlight_color.is_empty() {
            mapping.highlight_color = self.next_default_color().to_string();
        }

        info!("Adding keyword mapping {}", mapping.id);
        self.mappings.push(mapping);
        outcome
    }

    /// Validates and replaces the mapping with the same id, bumping
    /// `updated_at`. Uniqueness checks exclude the entry itself, so an
    /// update that keeps its own safe key passes.
    pub fn update(&mut self, mut mapping: KeywordMapping) -> ValidationOutcome {
        let Some(position) = self.mappings.iter().position(|m| m.id == mapping.id) else {
            let message = format!("No keyword mapping found with id {}", mapping.id);
            warn!("Update rejected: {message}");
            return ValidationOutcome::failure(vec![message]);
        };

        let outcome = validate_mapping(&mapping, &self.mappings);
        if !outcome.is_valid {
            warn!("Update rejected: {}", outcome.first_error());
            return outcome;
        }

        mapping.updated_at = Utc::now();
        info!("Updating keyword mapping {}", mapping.id);
        self.mappings[position] = mapping;
        outcome
    }

    pub fn remove(&mut self, id: Uuid) -> bool {
        let before = self.mappings.len();
        self.mappings.retain(|m| m.id != id);
        let removed = self.mappings.len() < before;
        if removed {
            info!("Removed keyword mapping {id}");
        } else {
            warn!("Remove failed: no keyword mapping with id {id}");
        }
        removed
    }

    pub fn clear(&mut self) {
        info!("Clearing dictionary ({} mappings)", self.mappings.len());
        self.mappings.clear();
    }

    /// Next color from the default palette, cycling.
    pub fn next_default_color(&mut self) -> &'static str {
        let color = DEFAULT_COLORS[self.color_index % DEFAULT_COLORS.len()];
        self.color_index += 1;
        color
    }

    /// Loads a dictionary from a YAML file, re-validating every entry.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading keyword dictionary from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read dictionary file {}", path.display()))?;
        let parsed: KeywordDictionary = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse dictionary file {}", path.display()))?;

        if parsed.mappings.len() > MAX_KEYWORD_COUNT {
            return Err(anyhow!(
                "Dictionary file {} holds {} mappings, limit is {}",
                path.display(),
                parsed.mappings.len(),
                MAX_KEYWORD_COUNT
            ));
        }

        let mut errors = Vec::new();
        let mut dictionary = KeywordDictionary::new();
        for mapping in parsed.mappings {
            let outcome = dictionary.add(mapping);
            if !outcome.is_valid {
                errors.extend(outcome.errors);
            }
        }

        if !errors.is_empty() {
            return Err(anyhow!("Dictionary validation failed:\n{}", errors.join("\n")));
        }

        info!("Loaded {} keyword mappings from file.", dictionary.len());
        Ok(dictionary)
    }

    /// Persists the dictionary as JSON through the key-value store.
    pub fn save_to_store(&self, store: &dyn KeyValueStore) -> Result<()> {
        storage::set_json(store, DICTIONARY_STORAGE_KEY, &self.mappings)?;
        debug!("Dictionary saved ({} mappings)", self.mappings.len());
        Ok(())
    }

    /// Loads a dictionary from the key-value store. Absent or corrupt data
    /// degrades to an empty dictionary.
    pub fn load_from_store(store: &dyn KeyValueStore) -> Result<Self> {
        let mappings: Vec<KeywordMapping> =
            storage::get_json(store, DICTIONARY_STORAGE_KEY)?.unwrap_or_default();
        debug!("Dictionary loaded ({} mappings)", mappings.len());
        Ok(Self {
            mappings,
            color_index: 0,
        })
    }
}
