//! Overlap resolution for raw automaton matches.
//!
//! License: MIT OR Apache-2.0

use alloc::vec::Vec;

use crate::automaton::PatternMatch;

/// Reduces raw matches to a non-overlapping set.
///
/// Policy: sort by (start ascending, length descending) and greedily accept
/// any match starting at or after the end of the last accepted one. At a
/// given position the longest pattern wins, leftmost matches win ties, and a
/// shorter pattern sharing a start with a longer one is permanently excluded
/// ("Project" never fires where "ProjectX" matched). The sort is stable, so
/// equal spans keep their emission order.
pub fn filter_overlaps(mut matches: Vec<PatternMatch>) -> Vec<PatternMatch> {
    matches.sort_by(|a, b| a.start.cmp(&b.start).then(b.end.cmp(&a.end)));

    let mut accepted: Vec<PatternMatch> = Vec::with_capacity(matches.len());
    let mut last_end = 0usize;

    for m in matches {
        if m.start >= last_end {
            last_end = m.end;
            accepted.push(m);
        }
    }

    accepted
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn m(start: usize, end: usize, pattern_index: usize) -> PatternMatch {
        PatternMatch { start, end, pattern_index }
    }

    #[test]
    fn longest_match_wins_at_shared_start() {
        let filtered = filter_overlaps(vec![m(11, 18, 0), m(11, 19, 1)]);
        assert_eq!(filtered, vec![m(11, 19, 1)]);
    }

    #[test]
    fn leftmost_match_wins_on_overlap() {
        // [0,4) beats [2,8) despite the latter being longer.
        let filtered = filter_overlaps(vec![m(2, 8, 1), m(0, 4, 0)]);
        assert_eq!(filtered, vec![m(0, 4, 0)]);
    }

    #[test]
    fn adjacent_matches_both_survive() {
        let filtered = filter_overlaps(vec![m(0, 4, 0), m(4, 8, 1)]);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn chain_of_overlaps_resolves_greedily() {
        let filtered = filter_overlaps(vec![m(0, 5, 0), m(3, 7, 1), m(6, 9, 2)]);
        assert_eq!(filtered, vec![m(0, 5, 0), m(6, 9, 2)]);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(filter_overlaps(Vec::new()).is_empty());
    }
}
