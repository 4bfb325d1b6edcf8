//! Property-based tests for calculator invariants
//!
//! Generators build valid and out-of-range inputs alike; the invariants must
//! hold for all of them.

mod calculator_invariants;
mod generators;
