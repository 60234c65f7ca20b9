//! Run statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{SkipReason, SkipStats};

/// Prints a one-line summary of a finished pass.
pub fn print_run_summary(lines_read: u64, captures: u64, skipped: u64, elapsed_seconds: f64) {
    info!(
        "✅ Summarized {} capture{} from {} line{} ({} skipped) in {:.1}s",
        captures,
        if captures == 1 { "" } else { "s" },
        lines_read,
        if lines_read == 1 { "" } else { "s" },
        skipped,
        elapsed_seconds
    );
}

/// Prints skipped-line counts per reason. Prints nothing when no line was
/// skipped.
pub fn print_skip_statistics(stats: &SkipStats) {
    let total = stats.total();
    if total == 0 {
        return;
    }

    info!("Skipped Lines ({} total):", total);
    for reason in SkipReason::iter() {
        let count = stats.count(reason);
        if count > 0 {
            info!("   {}: {}", reason.as_str(), count);
        }
    }
}
