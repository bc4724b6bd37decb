//! Integration test modules for fxrack
//!
//! Test categories:
//! - chain: append/remove ordering, removal correctness, control events
//! - rewire: single-path and idempotence properties, reverb crossfade
//! - source: stream/file mutual exclusion and media loading
//! - visualizer: analysis tap to frequency bars, viewport sizing

pub mod chain;
pub mod rewire;
pub mod source;
