//! Markdown structural analysis: extracts the protected-URL, fenced-code,
//! and inline-code ranges that region classification consumes.
//!
//! This is deliberately a lightweight structural scanner, not a full
//! Markdown parser - detection only needs the three range lists, and an
//! input the scanner cannot make sense of must degrade to empty lists
//! rather than fail the pipeline. External parsers can be swapped in
//! through the [`MarkdownAnalyzer`] trait.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::regions::{contains_position, TextRange};

static URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(?i)https?://[^\s<>\[\]"']+"#).unwrap());

/// `[label](target)` inline links; the capture is the target.
static INLINE_LINK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[[^\]]*\]\(([^)\s]+)\)").unwrap());

/// Produces the protected-range lists for a text.
pub trait MarkdownAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> MarkdownStructure;
}

/// The three range lists detection cares about. All ranges are half-open
/// byte ranges into the analyzed text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarkdownStructure {
    /// URLs that must never be rewritten.
    pub protected_urls: Vec<TextRange>,
    /// Fenced code blocks, fences included.
    pub code_blocks: Vec<TextRange>,
    /// Inline code spans, backticks included. Never nested in a fenced
    /// block - those are dropped during analysis.
    pub inline_code: Vec<TextRange>,
}

/// The built-in structural scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct StructureAnalyzer;

impl StructureAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl MarkdownAnalyzer for StructureAnalyzer {
    fn analyze(&self, text: &str) -> MarkdownStructure {
        if text.is_empty() {
            return MarkdownStructure::default();
        }

        let code_blocks = fenced_code_ranges(text);
        let mut inline_code = inline_code_ranges(text, &code_blocks);

        let mut protected_urls: Vec<TextRange> = Vec::new();
        for caps in INLINE_LINK.captures_iter(text) {
            if let Some(target) = caps.get(1) {
                protected_urls.push(TextRange::new(target.start(), target.end()));
            }
        }
        for m in URL.find_iter(text) {
            let candidate = TextRange::new(m.start(), m.end());
            let covered = protected_urls
                .iter()
                .any(|e| e.start < candidate.end && candidate.start < e.end);
            if covered
                || contains_position(candidate.start, &code_blocks)
                || contains_position(candidate.start, &inline_code)
            {
                continue;
            }
            protected_urls.push(candidate);
        }

        // An inline span that opens inside a fence is fence content, not its
        // own region.
        inline_code.retain(|ic| !contains_position(ic.start, &code_blocks));

        debug!(
            "Markdown analysis: {} urls, {} code blocks, {} inline spans",
            protected_urls.len(),
            code_blocks.len(),
            inline_code.len()
        );

        MarkdownStructure {
            protected_urls,
            code_blocks,
            inline_code,
        }
    }
}

/// Scans for ``` / ~~~ fences line by line. A block runs from the start of
/// its opening fence line to the end of its closing fence line; an
/// unterminated fence runs to the end of the text.
fn fenced_code_ranges(text: &str) -> Vec<TextRange> {
    let mut ranges = Vec::new();
    let mut open: Option<(usize, char, usize)> = None;
    let mut offset = 0usize;

    for line in text.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        let trimmed = content.trim_start();

        if let Some(fence_char) = trimmed.chars().next().filter(|c| *c == '`' || *c == '~') {
            let run = trimmed.chars().take_while(|c| *c == fence_char).count();
            if run >= 3 {
                match open {
                    None => open = Some((offset, fence_char, run)),
                    Some((start, open_char, open_len))
                        if fence_char == open_char
                            && run >= open_len
                            && trimmed.chars().skip(run).all(char::is_whitespace) =>
                    {
                        ranges.push(TextRange::new(start, offset + content.len()));
                        open = None;
                    }
                    Some(_) => {}
                }
            }
        }
        offset += line.len();
    }

    if let Some((start, _, _)) = open {
        ranges.push(TextRange::new(start, text.len()));
    }
    ranges
}

/// Scans for backtick-delimited inline code outside fenced blocks. An
/// opening run of N backticks is closed by the next run of exactly N; an
/// unmatched run is plain text.
fn inline_code_ranges(text: &str, code_blocks: &[TextRange]) -> Vec<TextRange> {
    let mut ranges = Vec::new();
    let bytes = text.as_bytes();
    let mut i = 0usize;

    while i < bytes.len() {
        if let Some(block) = code_blocks.iter().find(|r| r.contains_position(i)) {
            i = block.end.max(i + 1);
            continue;
        }
        if bytes[i] != b'`' {
            i += 1;
            continue;
        }

        let run_start = i;
        let mut run_len = 0usize;
        while i < bytes.len() && bytes[i] == b'`' {
            run_len += 1;
            i += 1;
        }

        let mut j = i;
        let mut close_end = None;
        while j < bytes.len() {
            if bytes[j] != b'`' {
                j += 1;
                continue;
            }
            let close_start = j;
            let mut close_len = 0usize;
            while j < bytes.len() && bytes[j] == b'`' {
                close_len += 1;
                j += 1;
            }
            if close_len == run_len {
                close_end = Some(close_start + close_len);
                break;
            }
        }

        if let Some(end) = close_end {
            ranges.push(TextRange::new(run_start, end));
            i = end;
        }
    }

    ranges
}
