//! Dictionary guard: structural validation for keyword mappings.
//!
//! Invoked by dictionary management before an entry is persisted - never by
//! detection or masking. All applicable problems are accumulated and
//! returned as data so a caller can render every error at once; nothing in
//! here returns `Err` or panics.
//!
//! License: MIT OR Apache-2.0

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::dictionary::{KeywordMapping, MAX_KEYWORD_LENGTH};
use crate::reserved;

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{6})$").unwrap());

/// Outcome of a guard check: success with optional warnings, or failure with
/// the full list of errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationOutcome {
    pub fn success() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn success_with_warnings(warnings: Vec<String>) -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
            warnings,
        }
    }

    pub fn failure(errors: Vec<String>) -> Self {
        Self {
            is_valid: false,
            errors,
            warnings: Vec::new(),
        }
    }

    /// First error message, or an empty string.
    pub fn first_error(&self) -> &str {
        self.errors.first().map(String::as_str).unwrap_or("")
    }
}

/// Validates a candidate mapping against the guard rules, accumulating every
/// applicable error instead of short-circuiting.
///
/// Uniqueness of the safe key is checked case-insensitively against
/// `existing`, excluding any entry with the candidate's own id so the update
/// path does not collide with itself.
pub fn validate_mapping(mapping: &KeywordMapping, existing: &[KeywordMapping]) -> ValidationOutcome {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let sensitive = mapping.sensitive_key.trim();
    if sensitive.is_empty() {
        errors.push("Sensitive key cannot be blank".to_string());
    } else {
        if mapping.sensitive_key.chars().count() > MAX_KEYWORD_LENGTH {
            errors.push(format!(
                "Sensitive key exceeds {MAX_KEYWORD_LENGTH} characters"
            ));
        }

        if reserved::is_reserved(&mapping.sensitive_key) {
            errors.push(format!(
                "'{}' is a protected programming-language keyword and cannot be a replacement target",
                mapping.sensitive_key
            ));
        } else if let Some(matched) = reserved::substring_of_reserved(&mapping.sensitive_key) {
            warnings.push(format!(
                "'{}' is part of reserved keyword '{}' and may cause unintended replacements",
                mapping.sensitive_key, matched
            ));
        }
    }

    let safe = mapping.safe_key.trim();
    if safe.is_empty() {
        errors.push("Safe key cannot be blank".to_string());
    } else {
        if mapping.safe_key.chars().count() > MAX_KEYWORD_LENGTH {
            errors.push(format!("Safe key exceeds {MAX_KEYWORD_LENGTH} characters"));
        }

        if !is_safe_key_unique(&mapping.safe_key, existing, Some(mapping.id)) {
            errors.push(format!(
                "Safe key '{}' is already in use, provide a unique safe key",
                mapping.safe_key
            ));
        }
    }

    if !mapping.highlight_color.is_empty() && !HEX_COLOR.is_match(&mapping.highlight_color) {
        errors.push("Invalid color format, use HEX such as #FF6B6B".to_string());
    }

    if !errors.is_empty() {
        let mut outcome = ValidationOutcome::failure(errors);
        outcome.warnings = warnings;
        return outcome;
    }
    if !warnings.is_empty() {
        return ValidationOutcome::success_with_warnings(warnings);
    }
    ValidationOutcome::success()
}

/// True if `safe_key` is not already used by another entry,
/// case-insensitively. `exclude_id` removes the entry itself from the
/// comparison set for updates.
pub fn is_safe_key_unique(
    safe_key: &str,
    existing: &[KeywordMapping],
    exclude_id: Option<uuid::Uuid>,
) -> bool {
    let needle = safe_key.to_lowercase();
    !existing.iter().any(|m| {
        m.safe_key.to_lowercase() == needle && exclude_id.map_or(true, |id| m.id != id)
    })
}
