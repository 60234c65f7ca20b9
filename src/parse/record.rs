//! Parsed CDX capture record.

/// One parsed CDX line.
///
/// Immutable once parsed. Optional columns are `None` when the line does not
/// carry them; a literal `-` is kept as `Some("-")`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRecord {
    /// Canonical sort key (`host)path?query`, host in reverse-domain form)
    pub surt: String,
    /// Reverse-domain host, e.g. `com,example,www`
    pub host: String,
    /// Path part of the sort key (may be empty)
    pub path: String,
    /// Query part of the sort key, without the `?` (may be empty)
    pub query: String,
    /// Capture time as `YYYYMMDDhhmmss`
    pub timestamp: String,
    /// Original URL of the capture
    pub url: String,
    /// MIME type as recorded
    pub mime: String,
    /// Three-digit HTTP status or `-`
    pub status: String,
    /// Content digest
    pub digest: String,
    /// Redirect target
    pub redirect: Option<String>,
    /// Robots meta tags
    pub meta_tags: Option<String>,
    /// Compressed record size in bytes (digits or `-`)
    pub bytes: Option<String>,
    /// Record offset inside the WARC file
    pub offset: Option<String>,
    /// WARC file name
    pub warc_file: Option<String>,
    /// Number of non-empty `/`-delimited path segments
    pub path_len: usize,
    /// Number of non-empty `&`-delimited query parameters
    pub query_len: usize,
}

impl CaptureRecord {
    fn timestamp_part(&self, start: usize, end: usize) -> &str {
        self.timestamp.get(start..end).unwrap_or("")
    }

    /// Four-digit year of the capture.
    pub fn year(&self) -> &str {
        self.timestamp_part(0, 4)
    }

    /// Two-digit month of the capture.
    pub fn month(&self) -> &str {
        self.timestamp_part(4, 6)
    }

    /// Two-digit day of the month.
    pub fn day(&self) -> &str {
        self.timestamp_part(6, 8)
    }

    /// Two-digit hour.
    pub fn hour(&self) -> &str {
        self.timestamp_part(8, 10)
    }

    /// Two-digit minute.
    pub fn minute(&self) -> &str {
        self.timestamp_part(10, 12)
    }

    /// Two-digit second.
    pub fn second(&self) -> &str {
        self.timestamp_part(12, 14)
    }

    /// Payload size when the bytes column is numeric.
    ///
    /// An all-digit value too large for `u64` saturates to `u64::MAX` rather
    /// than being treated as non-numeric.
    pub fn payload_size(&self) -> Option<u64> {
        let bytes = self.bytes.as_deref()?;
        match bytes.parse::<u64>() {
            Ok(size) => Some(size),
            Err(_) if !bytes.is_empty() && bytes.bytes().all(|b| b.is_ascii_digit()) => {
                Some(u64::MAX)
            }
            Err(_) => None,
        }
    }

    /// Path-length bucket key (`P0`, `P1`, ...).
    pub fn path_bucket(&self) -> String {
        format!("P{}", self.path_len)
    }

    /// Query-length bucket key (`Q0`, `Q1`, ...).
    pub fn query_bucket(&self) -> String {
        format!("Q{}", self.query_len)
    }
}

/// Counts the non-empty groups of `segment` delimited by `sep`, ignoring
/// leading and trailing separators.
///
/// `/a/b/` has 2 segments, `/` has none, and `/a//b` has 3.
pub(crate) fn segment_count(segment: &str, sep: char) -> usize {
    let trimmed = segment.trim_matches(sep);
    if trimmed.is_empty() {
        0
    } else {
        trimmed.matches(sep).count() + 1
    }
}

/// Splits a sort key into `(host, path, query)` at the first `)` and the
/// first `?` after it.
pub(crate) fn split_surt(surt: &str) -> (&str, &str, &str) {
    let (host, rest) = surt.split_once(')').unwrap_or((surt, ""));
    let (path, query) = rest.split_once('?').unwrap_or((rest, ""));
    (host, path, query)
}
