// promptmask-core/src/lib.rs
//! # Promptmask Core Library
//!
//! `promptmask-core` provides the fundamental, platform-independent logic
//! for sensitive-keyword detection, masking, and restoration. Given a
//! dictionary of (sensitive-term, safe-alias) pairs it finds every
//! occurrence of every term in a text, reports each with positional and
//! contextual metadata, replaces selected occurrences with their aliases,
//! and later reverses the process exactly from a previously masked text.
//!
//! The library is pure and synchronous: each call builds its own matcher
//! from the dictionary snapshot it is given and touches no global state, so
//! concurrent sessions need no synchronization.
//!
//! ## Modules
//!
//! * `dictionary`: The `KeywordMapping` entity and the guarded dictionary
//!   container, with YAML loading and key-value persistence.
//! * `validation`: The dictionary guard - accumulate-all-errors checks for
//!   candidate mappings.
//! * `reserved`: Reserved programming-language keyword sets.
//! * `keyword_match`: Detected keyword groups, occurrences, and mask/restore
//!   reporting types.
//! * `regions`: Half-open text ranges and containment queries.
//! * `markdown`: The structural analyzer producing protected-URL and code
//!   ranges, behind the `MarkdownAnalyzer` trait.
//! * `engine`: The `KeywordEngine` trait and cooperative cancellation.
//! * `engines`: Concrete engine implementations (`AhoCorasickEngine`).
//! * `storage`: The opaque key-value store abstraction and an in-memory
//!   implementation.
//! * `session`: Resumable work-session state.
//! * `debug_log`: A bounded ring-buffer sink for the `log` facade.
//! * `headless`: One-shot mask/restore convenience wrappers.
//!
//! ## Usage Example
//!
//! ```rust
//! use promptmask_core::{headless_mask_string, headless_restore_string, KeywordMapping};
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let dictionary = vec![
//!         KeywordMapping::new("CompanyX", "T001"),
//!         KeywordMapping::new("PersonY", "Dev_A"),
//!     ];
//!
//!     let masked = headless_mask_string("CompanyX hired PersonY.", &dictionary)?;
//!     assert_eq!(masked.masked_text, "T001 hired Dev_A.");
//!
//!     let restored = headless_restore_string(&masked.masked_text, &dictionary)?;
//!     assert_eq!(restored.restored_text, "CompanyX hired PersonY.");
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Fallible seams return `anyhow::Result`, with specific variants in
//! [`PromptMaskError`]. Dictionary-guard problems are returned as
//! [`ValidationOutcome`] data so a caller can render every error at once;
//! detection itself performs no I/O and degrades empty inputs to empty
//! results instead of failing.
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod debug_log;
pub mod dictionary;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod headless;
pub mod keyword_match;
pub mod markdown;
pub mod regions;
pub mod reserved;
pub mod session;
pub mod storage;
pub mod validation;

/// Re-exports the dictionary entity, container, and the library limits.
pub use dictionary::{
    KeywordDictionary,
    KeywordMapping,
    DEFAULT_COLORS,
    DICTIONARY_STORAGE_KEY,
    MAX_KEYWORD_COUNT,
    MAX_KEYWORD_LENGTH,
    MAX_TEXT_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::PromptMaskError;

/// Re-exports the core engine trait, cancellation token, and the standard
/// engine implementation.
pub use engine::{CancellationToken, KeywordEngine};
pub use engines::aho_engine::AhoCorasickEngine;

/// Re-exports detection and mask/restore reporting types.
pub use keyword_match::{
    redact_sensitive,
    DetectedKeyword,
    KeywordOccurrence,
    MaskResult,
    ReplacementDetail,
    RestoreResult,
};

/// Re-exports the dictionary guard surface.
pub use validation::{is_safe_key_unique, validate_mapping, ValidationOutcome};

/// Re-exports region and markdown structure types.
pub use markdown::{MarkdownAnalyzer, MarkdownStructure, StructureAnalyzer};
pub use regions::{contains_position, is_fully_contained, TextRange};

/// Re-exports persistence seams and session state.
pub use session::{WorkMode, WorkSession, SESSION_STORAGE_KEY};
pub use storage::{KeyValueStore, MemoryStore};

/// Re-exports the diagnostics ring buffer.
pub use debug_log::{LogEntry, RingBufferLogger, MAX_LOG_ENTRIES};

/// Re-exports one-shot convenience functions.
pub use headless::{headless_mask_string, headless_restore_string};
