//! Half-open text ranges and the containment queries used to protect or
//! annotate matches (URLs, fenced code, inline code).
//!
//! License: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

/// A half-open `[start, end)` byte range into a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextRange {
    pub start: usize,
    pub end: usize,
}

impl TextRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True if `pos` falls inside the range.
    pub fn contains_position(&self, pos: usize) -> bool {
        pos >= self.start && pos < self.end
    }

    /// True if `[start, end)` lies fully inside this range.
    pub fn contains_span(&self, start: usize, end: usize) -> bool {
        start >= self.start && end <= self.end
    }
}

/// True iff some range fully contains `[start, end)`.
pub fn is_fully_contained(start: usize, end: usize, ranges: &[TextRange]) -> bool {
    ranges.iter().any(|r| r.contains_span(start, end))
}

/// True iff some range contains the position.
pub fn contains_position(pos: usize, ranges: &[TextRange]) -> bool {
    ranges.iter().any(|r| r.contains_position(pos))
}
