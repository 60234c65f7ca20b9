//! Progress logging utilities.

use std::time::Instant;

use log::info;

/// Logs how many lines have been read so far and the read rate.
///
/// # Arguments
///
/// * `start_time` - When the pass started
/// * `lines_read` - Input lines consumed so far
/// * `captures` - Lines parsed into records so far
pub fn log_progress(start_time: Instant, lines_read: u64, captures: u64) {
    let elapsed_secs = start_time.elapsed().as_secs_f64();
    let rate = if elapsed_secs > 0.0 {
        lines_read as f64 / elapsed_secs
    } else {
        0.0
    };
    info!(
        "Read {} lines ({} captures) in {:.2} seconds (~{:.2} lines/sec)",
        lines_read, captures, elapsed_secs, rate
    );
}
