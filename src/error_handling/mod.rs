//! Error handling and skipped-line statistics.
//!
//! This module provides:
//! - Error type definitions (parse, report load, initialization)
//! - Skip reasons and their per-run tallies

mod stats;
mod types;

// Re-export public API
pub use stats::SkipStats;
pub use types::{InitializationError, MalformedReportError, ParseError, SkipReason};
