// promptmask-core/src/engines/mod.rs
//! Concrete implementations of the `KeywordEngine` trait.
//!
//! License: MIT OR Apache-2.0

pub mod aho_engine;
