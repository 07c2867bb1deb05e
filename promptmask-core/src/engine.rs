// promptmask-core/src/engine.rs
//! Defines the core KeywordEngine trait and the cooperative cancellation
//! token.
//!
//! The `KeywordEngine` trait decouples callers from the concrete matching
//! implementation, keeping the detect/mask/restore surface stable while the
//! engine underneath evolves.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::dictionary::{KeywordMapping, MAX_TEXT_LENGTH};
use crate::keyword_match::{DetectedKeyword, MaskResult, RestoreResult};

/// Cooperative cancellation signal.
///
/// Observed at the engine's boundaries only: before an automaton is built
/// and between per-keyword annotation passes. A scan already in flight runs
/// to completion - a full-size pass finishes in well under a second, so
/// mid-scan interruption buys nothing.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A trait that defines the core functionality of a keyword masking engine.
///
/// Each call builds its own matcher from the dictionary snapshot it is
/// given; implementations hold no mutable state, so one engine value can
/// serve concurrent sessions without synchronization.
pub trait KeywordEngine: Send + Sync {
    /// Finds every surviving occurrence of every dictionary sensitive key in
    /// `text`, grouped per dictionary entry in dictionary order.
    ///
    /// Empty text or an empty dictionary yields an empty list; this method
    /// performs no I/O and does not fail on malformed input.
    fn detect(&self, text: &str, dictionary: &[KeywordMapping]) -> Result<Vec<DetectedKeyword>>;

    /// Like [`KeywordEngine::detect`], but observes `token` at the
    /// cancellation points and surfaces
    /// [`crate::errors::PromptMaskError::Cancelled`] as a distinct signal -
    /// never an empty result.
    fn detect_with_cancellation(
        &self,
        text: &str,
        dictionary: &[KeywordMapping],
        token: &CancellationToken,
    ) -> Result<Vec<DetectedKeyword>>;

    /// Replaces every selected occurrence of every selected group with its
    /// safe key, rewriting end-to-start so earlier offsets never shift.
    /// Deselected occurrences stay verbatim and are reported as skipped.
    fn apply_mask(&self, text: &str, detected: &[DetectedKeyword]) -> Result<MaskResult>;

    /// Reverses a mask pass: finds safe-key occurrences in `masked_text`
    /// (longest-match-first, no URL or embedded-word suppression) and
    /// replaces each with its sensitive key.
    fn restore_text(
        &self,
        masked_text: &str,
        dictionary: &[KeywordMapping],
    ) -> Result<RestoreResult>;

    /// Caller-boundary precondition: true when `text` is within the
    /// supported length, measured in characters.
    fn validate_text_length(&self, text: &str) -> bool {
        text.chars().count() <= MAX_TEXT_LENGTH
    }
}
