//! Skipped-line statistics.
//!
//! Tallies how many input lines were dropped and why. Owned by the single
//! processing loop, so the counters are plain integers.

use std::collections::HashMap;
use strum::IntoEnumIterator;

use super::types::SkipReason;

/// Per-reason counters of skipped input lines.
///
/// All reasons are initialized to zero on creation.
#[derive(Debug, Clone)]
pub struct SkipStats {
    counts: HashMap<SkipReason, u64>,
}

impl SkipStats {
    /// Creates a tracker with every reason at zero.
    pub fn new() -> Self {
        let mut counts = HashMap::new();
        for reason in SkipReason::iter() {
            counts.insert(reason, 0);
        }
        SkipStats { counts }
    }

    /// Counts one skipped line.
    pub fn record(&mut self, reason: SkipReason) {
        *self.counts.entry(reason).or_insert(0) += 1;
    }

    /// Number of lines skipped for `reason`.
    pub fn count(&self, reason: SkipReason) -> u64 {
        self.counts.get(&reason).copied().unwrap_or(0)
    }

    /// Number of skipped lines over all reasons.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }
}

impl Default for SkipStats {
    fn default() -> Self {
        Self::new()
    }
}
