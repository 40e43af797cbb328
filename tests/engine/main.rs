//! Integration tests for Layer 2: Engine
//!
//! Tests for rule matching, rearrangement, related-item grouping, output
//! assembly, and sessions.

mod assembly;
mod grouping;
mod matching;
mod sessions;
