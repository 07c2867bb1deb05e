// promptmask-matcher/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod automaton;
pub mod overlap;

pub use automaton::{AhoCorasick, PatternMatch};
pub use overlap::filter_overlaps;
