//! errors.rs - Custom error types for the promptmask-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//! Dictionary-guard problems are deliberately NOT represented here: they are
//! returned as data (`ValidationOutcome`) so a caller can render every
//! problem at once.
//!
//! License: MIT OR Apache-2.0

use thiserror::Error;

/// This enum represents all possible error types in the `promptmask-core`
/// library.
///
/// `#[non_exhaustive]` signals to consumers that new variants may be added
/// in future versions, so they cannot match exhaustively and break.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PromptMaskError {
    #[error("Text length ({0} characters) exceeds maximum allowed ({1})")]
    TextTooLong(usize, usize),

    #[error("Dictionary is full: limit of {0} keyword mappings reached")]
    DictionaryFull(usize),

    #[error("No keyword mapping found with id {0}")]
    MappingNotFound(uuid::Uuid),

    #[error("Storage operation failed: {0}")]
    Storage(String),

    #[error("Failed to serialize or deserialize data: {0}")]
    Serialization(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Operation was cancelled before completion")]
    Cancelled,

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),
}
