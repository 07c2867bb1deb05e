// promptmask-core/src/keyword_match.rs
//! Provides core data structures and utility functions for detected keyword
//! groups, occurrences, and mask/restore reporting within the
//! `promptmask-core` library.
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use log::debug;
use crate::dictionary::KeywordMapping;

use lazy_static::lazy_static;

lazy_static! {
    /// A static boolean that is initialized once to determine if sensitive
    /// keyword text is allowed in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("PROMPTMASK_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// One concrete location where a dictionary term was found in a text.
///
/// `start..end` is a half-open byte range into the scanned text;
/// `original_text` preserves the casing found there, even though matching is
/// case-insensitive. Everything is immutable except the selection flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordOccurrence {
    pub start: usize,
    pub end: usize,
    /// 1-based line number of `start`.
    pub line_number: usize,
    /// 1-based column of `start`, measured in characters from the line start.
    pub column: usize,
    pub original_text: String,
    /// True when a CJK ideograph directly borders the match; replacing here
    /// risks splitting a word that has no delimiter.
    pub has_context_warning: bool,
    /// True when the match sits inside a fenced or inline code span.
    /// Informational only - code matches are reported, not suppressed.
    pub is_in_code_block: bool,
    pub is_selected: bool,
}

/// All surviving occurrences of one dictionary entry, plus the group-level
/// selection flag. Groups and occurrences default to selected; deselection
/// is how a caller opts specific matches out of masking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedKeyword {
    pub mapping: KeywordMapping,
    pub occurrences: Vec<KeywordOccurrence>,
    pub is_selected: bool,
}

impl DetectedKeyword {
    /// Number of occurrences in this group.
    pub fn count(&self) -> usize {
        self.occurrences.len()
    }

    /// True when any occurrence carries a context warning.
    pub fn has_warning(&self) -> bool {
        self.occurrences.iter().any(|o| o.has_context_warning)
    }

    /// Occurrences that would actually be replaced by a mask pass.
    pub fn selected_count(&self) -> usize {
        if !self.is_selected {
            return 0;
        }
        self.occurrences.iter().filter(|o| o.is_selected).count()
    }
}

/// Per-entry replacement summary reported by masking and restoration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplacementDetail {
    pub original: String,
    pub replacement: String,
    pub occurrence_count: usize,
}

/// Result of a mask pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaskResult {
    pub masked_text: String,
    pub replaced_count: usize,
    /// Detected occurrences left verbatim because their group or themselves
    /// were deselected.
    pub skipped_count: usize,
    pub details: Vec<ReplacementDetail>,
}

/// Result of a restore pass. Every matched alias is restored
/// unconditionally, so there is no skip accounting here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreResult {
    pub restored_text: String,
    pub restored_count: usize,
    pub details: Vec<ReplacementDetail>,
}

/// Replaces sensitive content in log output unless PII debugging was
/// explicitly enabled via `PROMPTMASK_ALLOW_DEBUG_PII`.
pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.chars().count() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.chars().count())
    }
}

fn loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_occurrence_debug(module_path: &str, original_text: &str, line_number: usize) {
    debug!(
        "{} Found occurrence: '{}' at line {}",
        module_path,
        loggable_content(original_text),
        line_number
    );
}

pub fn log_replacement_debug(module_path: &str, original: &str, replacement: &str) {
    debug!(
        "{} Replacement: '{}' -> '{}'",
        module_path,
        loggable_content(original),
        replacement
    );
}
