// promptmask-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for one-shot, non-interactive use of the engine:
//! detect everything and mask everything, or restore everything, in a single
//! call. These wrappers also enforce the text-length precondition that
//! interactive callers apply at their own boundary.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;

use crate::dictionary::{KeywordMapping, MAX_TEXT_LENGTH};
use crate::engine::KeywordEngine;
use crate::engines::aho_engine::AhoCorasickEngine;
use crate::errors::PromptMaskError;
use crate::keyword_match::{MaskResult, RestoreResult};

fn ensure_text_length(text: &str) -> Result<()> {
    let chars = text.chars().count();
    if chars > MAX_TEXT_LENGTH {
        return Err(PromptMaskError::TextTooLong(chars, MAX_TEXT_LENGTH).into());
    }
    Ok(())
}

/// Detects every sensitive key in `text` and masks every occurrence.
///
/// This is the primary entry point for non-interactive use; selective
/// masking requires driving [`KeywordEngine`] directly and toggling the
/// selection flags between `detect` and `apply_mask`.
pub fn headless_mask_string(text: &str, dictionary: &[KeywordMapping]) -> Result<MaskResult> {
    ensure_text_length(text)?;
    let engine = AhoCorasickEngine::new();
    let detected = engine.detect(text, dictionary)?;
    engine.apply_mask(text, &detected)
}

/// Restores every safe-key occurrence in `masked_text` back to its
/// sensitive key.
pub fn headless_restore_string(
    masked_text: &str,
    dictionary: &[KeywordMapping],
) -> Result<RestoreResult> {
    ensure_text_length(masked_text)?;
    let engine = AhoCorasickEngine::new();
    engine.restore_text(masked_text, dictionary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::KeywordMapping;

    #[test]
    fn test_headless_mask_string() -> Result<()> {
        let dictionary = vec![
            KeywordMapping::new("CompanyX", "T001"),
            KeywordMapping::new("PersonY", "Dev_A"),
        ];
        let result = headless_mask_string("CompanyX hired PersonY.", &dictionary)?;

        assert_eq!(result.masked_text, "T001 hired Dev_A.");
        assert_eq!(result.replaced_count, 2);
        assert_eq!(result.skipped_count, 0);
        Ok(())
    }

    #[test]
    fn test_headless_restore_string() -> Result<()> {
        let dictionary = vec![KeywordMapping::new("CompanyX", "T001")];
        let result = headless_restore_string("T001 shipped.", &dictionary)?;

        assert_eq!(result.restored_text, "CompanyX shipped.");
        assert_eq!(result.restored_count, 1);
        Ok(())
    }

    #[test]
    fn oversized_text_is_rejected() {
        let dictionary = vec![KeywordMapping::new("CompanyX", "T001")];
        let text = "a".repeat(MAX_TEXT_LENGTH + 1);
        let err = headless_mask_string(&text, &dictionary).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PromptMaskError>(),
            Some(PromptMaskError::TextTooLong(_, _))
        ));
    }
}
