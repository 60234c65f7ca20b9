//! Configuration constants.
//!
//! Defaults for the CLI and library configuration, plus the fixed category
//! tables shared by the aggregator and the report bucketer.

/// Default number of sample memento URLs kept in a summary.
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// Default number of hosts with the most captures kept in a summary.
pub const DEFAULT_TOP_HOSTS: usize = 10;

/// Log a progress line every this many input lines.
pub const LOGGING_INTERVAL_LINES: u64 = 1_000_000;

/// Stdin indicator for the input path.
pub const STDIN_PATH: &str = "-";

/// Default replay prefix used to build memento URLs from samples.
pub const DEFAULT_REPLAY_URL: &str = "https://web.archive.org/web";

/// Returned when a 14-digit timestamp cannot be turned into a date.
pub const UNKNOWN_DATE: &str = "UNKNOWN";

/// Only captures with this status are sampled.
pub const SAMPLE_STATUS: &str = "200";
/// Only captures with this exact MIME type are sampled.
pub const SAMPLE_MIME: &str = "text/html";
/// Captures whose sort key ends with this are never sampled.
pub const SAMPLE_EXCLUDED_SUFFIX: &str = "/robots.txt";
/// Default-port suffix stripped from sampled URLs (first occurrence only).
pub const DEFAULT_PORT_SUFFIX: &str = ":80/";

/// Largest path-segment / query-parameter count with its own bucket.
/// Larger counts fall into the "Other" bucket.
pub const MAX_LENGTH_BUCKET: usize = 4;

/// Prefix of path-length bucket keys (`P0`, `P1`, ...).
pub const PATH_BUCKET_PREFIX: &str = "P";
/// Prefix of query-length bucket keys (`Q0`, `Q1`, ...).
pub const QUERY_BUCKET_PREFIX: &str = "Q";

/// Label of the catch-all bucket in every grid dimension.
pub const OTHER_BUCKET: &str = "Other";

/// Calendar month columns of the year/month grid.
pub const MONTHS: [&str; 12] = [
    "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12",
];

/// Leading token of the field legend line (` CDX N b a m s k r M S V g`).
pub const CDX_HEADER_PREFIX: &str = "CDX ";
