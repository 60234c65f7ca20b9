//! Report bucketing.
//!
//! Pure functions turning a [`RawReport`] into a [`BucketedReport`]: the
//! free-form distribution tables become dense grids over fixed categories,
//! and reverse-domain host keys become ordinary dotted host names.
//!
//! | grid         | rows                     | columns                        |
//! |--------------|--------------------------|--------------------------------|
//! | `mimestatus` | MIME categories          | `2XX 3XX 4XX 5XX Other`        |
//! | `pathquery`  | `P0`..`P4`, `Other`      | `Q0`..`Q4`, `Other`            |
//! | `yearmonth`  | years present in data    | `01`..`12`, `Other`            |

mod grid;
mod mime;

use chrono::NaiveDateTime;
use serde::Serialize;
use strum::IntoEnumIterator;

use crate::aggregate::{NestedCounter, RawReport, ReportTables, TopHosts};
use crate::config::{
    MAX_LENGTH_BUCKET, MONTHS, OTHER_BUCKET, PATH_BUCKET_PREFIX, QUERY_BUCKET_PREFIX,
    UNKNOWN_DATE,
};
use crate::sampler::Sample;

pub use grid::Grid;
pub use mime::{MimeCategory, StatusGroup};

/// Bucketed distribution grids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BucketedTables {
    /// Grids of the standard dialect.
    Full {
        /// MIME category × status group
        mimestatus: Grid,
        /// Path bucket × query bucket
        pathquery: Grid,
        /// Year × month
        yearmonth: Grid,
    },
    /// The single grid of the legacy dialect.
    Legacy {
        /// MIME category × status group
        media: Grid,
    },
}

/// Display-ready report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketedReport {
    /// Lines parsed successfully
    pub captures: u64,
    /// Sort-key transitions between consecutive records
    pub urls: u64,
    /// Host transitions between consecutive records
    pub hosts: u64,
    /// Sum of numeric payload sizes
    pub bytes: u64,
    /// Earliest timestamp (`""` when nothing was parsed)
    pub first: String,
    /// Latest timestamp (`""` when nothing was parsed)
    pub last: String,
    /// Hosts with the most captures, dotted host names
    pub tophosts: TopHosts,
    /// Distribution grids
    #[serde(flatten)]
    pub tables: BucketedTables,
    /// Sampled `(timestamp, url)` pairs
    pub samples: Vec<Sample>,
}

impl BucketedReport {
    /// Date of the first memento, `YYYY-MM-DD` or `UNKNOWN`.
    pub fn first_date(&self) -> String {
        memento_date(&self.first)
    }

    /// Date of the last memento, `YYYY-MM-DD` or `UNKNOWN`.
    pub fn last_date(&self) -> String {
        memento_date(&self.last)
    }

    /// Number of hosts not listed in `tophosts`.
    pub fn other_hosts(&self) -> u64 {
        self.hosts.saturating_sub(self.tophosts.len() as u64)
    }

    /// Captures of the hosts not listed in `tophosts`.
    pub fn other_host_captures(&self) -> u64 {
        self.captures.saturating_sub(self.tophosts.total())
    }
}

impl From<&RawReport> for BucketedReport {
    fn from(raw: &RawReport) -> Self {
        bucket_report(raw)
    }
}

/// Buckets a raw report. Deterministic: equal inputs give equal outputs.
pub fn bucket_report(raw: &RawReport) -> BucketedReport {
    let tables = match &raw.tables {
        ReportTables::Full {
            mimestatus,
            pathquery,
            yearmonth,
        } => BucketedTables::Full {
            mimestatus: mime_status_grid(mimestatus),
            pathquery: path_query_grid(pathquery),
            yearmonth: year_month_grid(yearmonth),
        },
        ReportTables::Legacy { media } => BucketedTables::Legacy {
            media: mime_status_grid(media),
        },
    };
    BucketedReport {
        captures: raw.captures,
        urls: raw.urls,
        hosts: raw.hosts,
        bytes: raw.bytes,
        first: raw.first.clone(),
        last: raw.last.clone(),
        tophosts: display_top_hosts(&raw.tophosts),
        tables,
        samples: raw.samples.clone(),
    }
}

/// MIME category × status group grid.
pub fn mime_status_grid(table: &NestedCounter) -> Grid {
    let mut grid = Grid::new(
        MimeCategory::iter().map(|c| c.as_str()),
        StatusGroup::iter().map(|g| g.as_str()),
    );
    for (mime, status, count) in table.iter() {
        grid.add(
            MimeCategory::classify(mime).as_str(),
            StatusGroup::classify(status).as_str(),
            count,
        );
    }
    grid
}

fn length_buckets(prefix: &str) -> Vec<String> {
    (0..=MAX_LENGTH_BUCKET)
        .map(|n| format!("{prefix}{n}"))
        .chain(std::iter::once(OTHER_BUCKET.to_string()))
        .collect()
}

/// Normalizes a `P{n}` / `Q{n}` key; counts above the last bucket and
/// unrecognized keys fall into `Other`.
pub fn length_bucket(key: &str, prefix: &str) -> String {
    key.strip_prefix(prefix)
        .and_then(|n| n.parse::<usize>().ok())
        .filter(|n| *n <= MAX_LENGTH_BUCKET)
        .map(|n| format!("{prefix}{n}"))
        .unwrap_or_else(|| OTHER_BUCKET.to_string())
}

/// Path bucket × query bucket grid.
pub fn path_query_grid(table: &NestedCounter) -> Grid {
    let mut grid = Grid::new(
        length_buckets(PATH_BUCKET_PREFIX),
        length_buckets(QUERY_BUCKET_PREFIX),
    );
    for (path, query, count) in table.iter() {
        grid.add(
            &length_bucket(path, PATH_BUCKET_PREFIX),
            &length_bucket(query, QUERY_BUCKET_PREFIX),
            count,
        );
    }
    grid
}

/// Month column of a raw month key.
pub fn month_bucket(month: &str) -> &str {
    if MONTHS.contains(&month) {
        month
    } else {
        OTHER_BUCKET
    }
}

/// Year × month grid. Rows are the years present in `table`.
pub fn year_month_grid(table: &NestedCounter) -> Grid {
    let columns = MONTHS.iter().copied().chain(std::iter::once(OTHER_BUCKET));
    let mut grid = Grid::new(table.outer_keys(), columns);
    for (year, month, count) in table.iter() {
        grid.add(year, month_bucket(month), count);
    }
    grid
}

/// Turns a reverse-domain host (`com,example,www`) into its dotted form
/// (`www.example.com`).
pub fn display_host(host: &str) -> String {
    host.split(',').rev().collect::<Vec<_>>().join(".")
}

/// Re-keys top hosts into dotted form, keeping the ranking.
pub fn display_top_hosts(tophosts: &TopHosts) -> TopHosts {
    TopHosts(
        tophosts
            .iter()
            .map(|(host, count)| (display_host(host), count))
            .collect(),
    )
}

/// Formats a 14-digit timestamp as `YYYY-MM-DD`.
///
/// Anything that is not a valid timestamp, including the empty string of an
/// empty report, gives `UNKNOWN`.
pub fn memento_date(timestamp: &str) -> String {
    NaiveDateTime::parse_from_str(timestamp, "%Y%m%d%H%M%S")
        .map(|dt| dt.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|_| UNKNOWN_DATE.to_string())
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
