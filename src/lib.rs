//! cdx_summary library: single-pass summaries of web archive capture indexes
//!
//! Turns a stream of CDX lines into a fixed-size report: capture, URL and host
//! counts, byte totals, the time span, MIME/status, path/query and year/month
//! distributions, the hosts with the most captures, and a small random sample
//! of HTML mementos. Memory stays bounded no matter how long the stream is.
//!
//! # Example
//!
//! ```no_run
//! use cdx_summary::{bucket_report, summarize_path, Config};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     file: std::path::PathBuf::from("item.cdx"),
//!     sample_size: 5,
//!     ..Default::default()
//! };
//!
//! let run = summarize_path(&config)?;
//! let summary = bucket_report(&run.report);
//! println!(
//!     "{} captures of {} URLs between {} and {}",
//!     summary.captures,
//!     summary.urls,
//!     summary.first_date(),
//!     summary.last_date()
//! );
//! # Ok(())
//! # }
//! ```
//!
//! The lower layers can be driven directly: [`parse_line`] turns one line into
//! a [`CaptureRecord`], [`StreamAggregator`] accumulates records and produces
//! [`RawReport`] snapshots, and [`bucket_report`] turns a raw report into
//! display-ready grids.

#![warn(missing_docs)]

pub mod aggregate;
mod app;
pub mod bucket;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod output;
pub mod parse;
mod run;
pub mod sampler;

// Re-export public API
pub use aggregate::{NestedCounter, RawReport, ReportTables, StreamAggregator, TopHosts};
pub use bucket::{bucket_report, BucketedReport, Grid};
pub use config::{Config, LogFormat, LogLevel, Opt};
pub use error_handling::{MalformedReportError, ParseError, SkipReason, SkipStats};
pub use parse::{parse_line, CaptureRecord, Dialect};
pub use run::{load_report, load_report_path, summarize, summarize_path, SummaryRun};
pub use sampler::{Sample, Sampler};
