//! Arena-based Aho-Corasick automaton for case-insensitive multi-pattern search.
//!
//! Patterns are inserted into a trie of case-folded characters; `build`
//! computes failure links (longest proper suffix that is also a trie path)
//! and output links (nearest terminal suffix), after which `find_all` scans a
//! haystack in a single left-to-right pass. Total cost is
//! O(haystack + total pattern length + matches), independent of how many
//! patterns share prefixes or are substrings of one another.
//!
//! Nodes live in a flat arena owned by the automaton; failure and output
//! links are arena indices, never owning references, since they point
//! backward toward the root and do not form a tree.
//!
//! License: MIT OR Apache-2.0

use alloc::collections::{BTreeMap, VecDeque};
use alloc::vec::Vec;

const ROOT: u32 = 0;
/// Sentinel for "no output link". Node ids are bounded by total pattern
/// length, which stays far below `u32::MAX` for dictionary-scale inputs.
const NONE: u32 = u32::MAX;

/// A single raw match reported by [`AhoCorasick::find_all`].
///
/// `start..end` is a half-open byte range into the original (unfolded)
/// haystack, always landing on character boundaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub start: usize,
    pub end: usize,
    /// Index supplied alongside the pattern in [`AhoCorasick::add_pattern`].
    pub pattern_index: usize,
}

impl PatternMatch {
    /// Length of the matched span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[derive(Debug)]
struct Terminal {
    pattern_index: usize,
    /// Pattern length in characters; every trie edge consumes exactly one
    /// haystack character, so this is also the matched span's char count.
    len_chars: usize,
}

#[derive(Debug)]
struct Node {
    children: BTreeMap<char, u32>,
    fail: u32,
    output: u32,
    terminal: Option<Terminal>,
}

impl Node {
    fn new() -> Self {
        Self {
            children: BTreeMap::new(),
            fail: ROOT,
            output: NONE,
            terminal: None,
        }
    }
}

/// Case-folds one scalar. Multi-scalar lowercase expansions keep their first
/// scalar so that one trie edge always corresponds to one haystack character.
#[inline]
fn fold_char(ch: char) -> char {
    ch.to_lowercase().next().unwrap_or(ch)
}

/// A multi-pattern matcher built once per pattern set and queried any number
/// of times. Construction order: [`AhoCorasick::add_pattern`] for every
/// pattern, then [`AhoCorasick::build`] exactly once, then
/// [`AhoCorasick::find_all`].
#[derive(Debug)]
pub struct AhoCorasick {
    nodes: Vec<Node>,
    built: bool,
}

impl Default for AhoCorasick {
    fn default() -> Self {
        Self::new()
    }
}

impl AhoCorasick {
    pub fn new() -> Self {
        let mut nodes = Vec::new();
        nodes.push(Node::new());
        Self {
            nodes,
            built: false,
        }
    }

    /// Inserts a pattern, one folded character per trie edge.
    ///
    /// Empty patterns are rejected by callers (dictionary keys are validated
    /// non-blank upstream); passing one here is a no-op. When two patterns
    /// fold to the same character sequence, the last insertion wins.
    pub fn add_pattern(&mut self, pattern: &str, pattern_index: usize) {
        debug_assert!(!self.built, "add_pattern after build");
        if pattern.is_empty() {
            return;
        }

        let mut current = ROOT;
        let mut len_chars = 0usize;
        for ch in pattern.chars() {
            let folded = fold_char(ch);
            len_chars += 1;
            let existing = self.nodes[current as usize].children.get(&folded).copied();
            current = match existing {
                Some(next) => next,
                None => {
                    let id = self.nodes.len() as u32;
                    self.nodes.push(Node::new());
                    self.nodes[current as usize].children.insert(folded, id);
                    id
                }
            };
        }
        self.nodes[current as usize].terminal = Some(Terminal {
            pattern_index,
            len_chars,
        });
    }

    /// Computes failure and output links via breadth-first traversal.
    ///
    /// Must be called after the last `add_pattern` and before the first
    /// `find_all`; the automaton is frozen afterwards.
    pub fn build(&mut self) {
        let mut queue = VecDeque::new();

        let depth_one: Vec<u32> = self.nodes[ROOT as usize].children.values().copied().collect();
        for child in depth_one {
            self.nodes[child as usize].fail = ROOT;
            queue.push_back(child);
        }

        while let Some(current) = queue.pop_front() {
            let edges: Vec<(char, u32)> = self.nodes[current as usize]
                .children
                .iter()
                .map(|(&ch, &id)| (ch, id))
                .collect();

            for (ch, child) in edges {
                queue.push_back(child);

                // Walk the failure chain until some node has an edge for ch.
                let mut cursor = self.nodes[current as usize].fail;
                let fail_target = loop {
                    if let Some(&next) = self.nodes[cursor as usize].children.get(&ch) {
                        break next;
                    }
                    if cursor == ROOT {
                        break ROOT;
                    }
                    cursor = self.nodes[cursor as usize].fail;
                };

                let output = if self.nodes[fail_target as usize].terminal.is_some() {
                    fail_target
                } else {
                    self.nodes[fail_target as usize].output
                };
                let node = &mut self.nodes[child as usize];
                node.fail = fail_target;
                node.output = output;
            }
        }

        self.built = true;
    }

    /// Reports every occurrence of every pattern in `haystack`.
    ///
    /// Matching is case-insensitive; the reported byte spans index the
    /// original haystack. Overlapping and nested matches are all reported;
    /// resolution is the caller's concern (see [`crate::filter_overlaps`]).
    pub fn find_all(&self, haystack: &str) -> Vec<PatternMatch> {
        debug_assert!(self.built, "find_all before build");

        let mut matches = Vec::new();
        let mut state = ROOT;
        // Byte offset where each scanned character starts; index = char
        // position. Lets a match ending here recover its start offset even
        // when folding changed nothing about the original byte widths.
        let mut char_starts: Vec<usize> = Vec::new();

        for (offset, ch) in haystack.char_indices() {
            let folded = fold_char(ch);
            char_starts.push(offset);
            let end = offset + ch.len_utf8();

            loop {
                if let Some(&next) = self.nodes[state as usize].children.get(&folded) {
                    state = next;
                    break;
                }
                if state == ROOT {
                    break;
                }
                state = self.nodes[state as usize].fail;
            }

            // Emit the current node's terminal, then every terminal suffix
            // reachable through the output chain.
            let consumed = char_starts.len();
            let mut cursor = state;
            while cursor != NONE {
                let node = &self.nodes[cursor as usize];
                if let Some(t) = &node.terminal {
                    matches.push(PatternMatch {
                        start: char_starts[consumed - t.len_chars],
                        end,
                        pattern_index: t.pattern_index,
                    });
                }
                cursor = node.output;
            }
        }

        matches
    }

    /// Number of arena nodes, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
