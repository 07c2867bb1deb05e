// promptmask-core/src/engines/aho_engine.rs
//! A `KeywordEngine` implementation built on the promptmask-matcher
//! Aho-Corasick automaton: detection, masking, and restoration.
//!
//! License: MIT OR Apache-2.0

use anyhow::Result;
use log::{debug, info};

use promptmask_matcher::{filter_overlaps, AhoCorasick, PatternMatch};

use crate::dictionary::KeywordMapping;
use crate::engine::{CancellationToken, KeywordEngine};
use crate::errors::PromptMaskError;
use crate::keyword_match::{
    log_occurrence_debug, log_replacement_debug, DetectedKeyword, KeywordOccurrence, MaskResult,
    ReplacementDetail, RestoreResult,
};
use crate::markdown::{MarkdownAnalyzer, StructureAnalyzer};
use crate::regions::is_fully_contained;

/// The standard engine. Holds only the injected markdown analyzer; every
/// call builds a fresh automaton from the dictionary snapshot it receives,
/// so there is no stale-matcher state to manage.
pub struct AhoCorasickEngine {
    analyzer: Box<dyn MarkdownAnalyzer>,
}

impl Default for AhoCorasickEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AhoCorasickEngine {
    pub fn new() -> Self {
        Self {
            analyzer: Box::new(StructureAnalyzer::new()),
        }
    }

    /// Swaps in an external markdown analyzer (e.g. one backed by a full
    /// parser). A failing analyzer should return empty range lists so
    /// detection proceeds without region protection.
    pub fn with_analyzer(analyzer: Box<dyn MarkdownAnalyzer>) -> Self {
        Self { analyzer }
    }

    fn detect_inner(
        &self,
        text: &str,
        dictionary: &[KeywordMapping],
        token: Option<&CancellationToken>,
    ) -> Result<Vec<DetectedKeyword>> {
        if text.is_empty() || dictionary.is_empty() {
            return Ok(Vec::new());
        }

        debug!(
            "Starting detection: text length {}, dictionary size {}",
            text.len(),
            dictionary.len()
        );

        if let Some(token) = token {
            if token.is_cancelled() {
                return Err(PromptMaskError::Cancelled.into());
            }
        }

        let structure = self.analyzer.analyze(text);

        let mut matcher = AhoCorasick::new();
        for (index, mapping) in dictionary.iter().enumerate() {
            matcher.add_pattern(&mapping.sensitive_key, index);
        }
        matcher.build();

        let filtered = filter_overlaps(matcher.find_all(text));
        let line_starts = line_start_offsets(text);

        // Bucket per dictionary entry so groups come out in dictionary order.
        let mut buckets: Vec<Vec<PatternMatch>> = vec![Vec::new(); dictionary.len()];
        for m in filtered {
            buckets[m.pattern_index].push(m);
        }

        let mut result = Vec::new();
        for (index, matches) in buckets.into_iter().enumerate() {
            if matches.is_empty() {
                continue;
            }
            if let Some(token) = token {
                if token.is_cancelled() {
                    return Err(PromptMaskError::Cancelled.into());
                }
            }

            let mapping = &dictionary[index];
            // The embedded-word rule only makes sense for all-Latin
            // patterns: "ai" must not fire inside "train".
            let all_ascii_letters = !mapping.sensitive_key.is_empty()
                && mapping.sensitive_key.chars().all(|c| c.is_ascii_alphabetic());

            let mut occurrences = Vec::new();
            for m in matches {
                if is_fully_contained(m.start, m.end, &structure.protected_urls) {
                    continue;
                }
                if all_ascii_letters && has_adjacent_ascii_letter(text, m.start, m.end) {
                    continue;
                }

                let line_number = line_number_for(&line_starts, m.start);
                let line_start = line_starts[line_number - 1];
                let column = text[line_start..m.start].chars().count() + 1;
                let original_text = text[m.start..m.end].to_string();
                let is_in_code_block = is_fully_contained(m.start, m.end, &structure.code_blocks)
                    || is_fully_contained(m.start, m.end, &structure.inline_code);

                log_occurrence_debug(module_path!(), &original_text, line_number);

                occurrences.push(KeywordOccurrence {
                    start: m.start,
                    end: m.end,
                    line_number,
                    column,
                    original_text,
                    has_context_warning: has_adjacent_cjk(text, m.start, m.end),
                    is_in_code_block,
                    is_selected: true,
                });
            }

            if !occurrences.is_empty() {
                result.push(DetectedKeyword {
                    mapping: mapping.clone(),
                    occurrences,
                    is_selected: true,
                });
            }
        }

        info!(
            "Detection complete: {} keyword groups, {} occurrences",
            result.len(),
            result.iter().map(DetectedKeyword::count).sum::<usize>()
        );

        Ok(result)
    }
}

impl KeywordEngine for AhoCorasickEngine {
    fn detect(&self, text: &str, dictionary: &[KeywordMapping]) -> Result<Vec<DetectedKeyword>> {
        self.detect_inner(text, dictionary, None)
    }

    fn detect_with_cancellation(
        &self,
        text: &str,
        dictionary: &[KeywordMapping],
        token: &CancellationToken,
    ) -> Result<Vec<DetectedKeyword>> {
        self.detect_inner(text, dictionary, Some(token))
    }

    fn apply_mask(&self, text: &str, detected: &[DetectedKeyword]) -> Result<MaskResult> {
        debug!("Starting mask pass over {} keyword groups", detected.len());

        let mut total_occurrences = 0usize;
        let mut replacements: Vec<(usize, usize, &str)> = Vec::new();
        for group in detected {
            total_occurrences += group.occurrences.len();
            if !group.is_selected {
                continue;
            }
            for occ in &group.occurrences {
                if occ.is_selected {
                    log_replacement_debug(module_path!(), &occ.original_text, &group.mapping.safe_key);
                    replacements.push((occ.start, occ.end, group.mapping.safe_key.as_str()));
                }
            }
        }

        // End-to-start: edits at higher offsets never invalidate the byte
        // positions of edits still to come.
        replacements.sort_by(|a, b| b.0.cmp(&a.0));

        let mut masked_text = text.to_string();
        for &(start, end, replacement) in &replacements {
            masked_text.replace_range(start..end, replacement);
        }

        let replaced_count = replacements.len();
        let skipped_count = total_occurrences - replaced_count;

        let details: Vec<ReplacementDetail> = detected
            .iter()
            .filter(|g| g.is_selected && g.occurrences.iter().any(|o| o.is_selected))
            .map(|g| ReplacementDetail {
                original: g.mapping.sensitive_key.clone(),
                replacement: g.mapping.safe_key.clone(),
                occurrence_count: g.occurrences.iter().filter(|o| o.is_selected).count(),
            })
            .collect();

        info!("Mask complete: {replaced_count} replaced, {skipped_count} skipped");

        Ok(MaskResult {
            masked_text,
            replaced_count,
            skipped_count,
            details,
        })
    }

    fn restore_text(
        &self,
        masked_text: &str,
        dictionary: &[KeywordMapping],
    ) -> Result<RestoreResult> {
        if masked_text.is_empty() || dictionary.is_empty() {
            return Ok(RestoreResult {
                restored_text: masked_text.to_string(),
                restored_count: 0,
                details: Vec::new(),
            });
        }

        debug!("Starting restoration: text length {}", masked_text.len());

        let mut matcher = AhoCorasick::new();
        for (index, mapping) in dictionary.iter().enumerate() {
            matcher.add_pattern(&mapping.safe_key, index);
        }
        matcher.build();

        // Aliases are machine-generated, so the URL and embedded-word
        // heuristics from detection do not apply here.
        let mut replacements = filter_overlaps(matcher.find_all(masked_text));
        replacements.sort_by(|a, b| b.start.cmp(&a.start));

        let mut restored_text = masked_text.to_string();
        let mut counts = vec![0usize; dictionary.len()];
        for m in &replacements {
            let mapping = &dictionary[m.pattern_index];
            restored_text.replace_range(m.start..m.end, &mapping.sensitive_key);
            counts[m.pattern_index] += 1;
        }

        let details: Vec<ReplacementDetail> = dictionary
            .iter()
            .zip(&counts)
            .filter(|(_, &count)| count > 0)
            .map(|(mapping, &count)| ReplacementDetail {
                original: mapping.safe_key.clone(),
                replacement: mapping.sensitive_key.clone(),
                occurrence_count: count,
            })
            .collect();

        let restored_count = replacements.len();
        info!("Restoration complete: {restored_count} restored");

        Ok(RestoreResult {
            restored_text,
            restored_count,
            details,
        })
    }
}

/// Byte offset of every line start: 0, plus each position after a `\n`.
fn line_start_offsets(text: &str) -> Vec<usize> {
    let mut starts = vec![0usize];
    for (offset, byte) in text.bytes().enumerate() {
        if byte == b'\n' {
            starts.push(offset + 1);
        }
    }
    starts
}

/// 1-based line number for a byte position, via binary search over the line
/// starts.
fn line_number_for(line_starts: &[usize], position: usize) -> usize {
    line_starts.partition_point(|&start| start <= position)
}

fn is_cjk(ch: char) -> bool {
    // CJK Unified Ideographs block.
    ('\u{4E00}'..='\u{9FFF}').contains(&ch)
}

/// True when the character directly before `start` or directly after `end`
/// is a CJK ideograph.
fn has_adjacent_cjk(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    before.is_some_and(is_cjk) || after.is_some_and(is_cjk)
}

/// True when the character directly before `start` or directly after `end`
/// is an ASCII letter - the signal that an all-Latin keyword sits inside an
/// unrelated Latin word.
fn has_adjacent_ascii_letter(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    before.is_some_and(|c| c.is_ascii_alphabetic()) || after.is_some_and(|c| c.is_ascii_alphabetic())
}
