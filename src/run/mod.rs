//! Run driver.
//!
//! Pulls lines from a byte source, feeds them to a [`StreamAggregator`], and
//! tallies what had to be skipped. Also loads previously written reports.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use log::{debug, info};

use crate::aggregate::{RawReport, StreamAggregator};
use crate::app::{log_progress, print_run_summary, print_skip_statistics};
use crate::config::{Config, CDX_HEADER_PREFIX, LOGGING_INTERVAL_LINES, STDIN_PATH};
use crate::error_handling::{ParseError, SkipReason, SkipStats};

/// Outcome of one pass over a CDX source.
#[derive(Debug, Clone)]
pub struct SummaryRun {
    /// Aggregated report
    pub report: RawReport,
    /// Input lines consumed, including skipped ones
    pub lines_read: u64,
    /// Skipped lines per reason
    pub skipped: SkipStats,
    /// Wall-clock duration of the pass
    pub elapsed_seconds: f64,
}

fn rejected(err: ParseError) -> SkipReason {
    debug!("{}", err);
    SkipReason::from(&err)
}

fn feed_line(aggregator: &mut StreamAggregator, bytes: &[u8]) -> Result<(), SkipReason> {
    let line = std::str::from_utf8(bytes).map_err(|_| rejected(ParseError::InvalidUtf8))?;
    let line = line.trim();
    if line.is_empty() {
        return Err(SkipReason::BlankLine);
    }
    if line.starts_with(CDX_HEADER_PREFIX) {
        return Err(SkipReason::Header);
    }
    aggregator.process_line(line).map_err(rejected)
}

/// Summarizes every line of `reader` in a single pass.
///
/// Blank lines, the CDX header, lines that are not UTF-8, and lines that do
/// not parse are skipped and counted.
///
/// # Errors
///
/// Returns an error if reading from `reader` fails. Malformed lines are never
/// an error.
pub fn summarize<R: BufRead>(mut reader: R, config: &Config) -> Result<SummaryRun> {
    let start_time = Instant::now();
    let mut aggregator = StreamAggregator::from_config(config);
    let mut skipped = SkipStats::new();
    let mut lines_read: u64 = 0;
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .context("Failed to read CDX input")?;
        if n == 0 {
            break;
        }
        lines_read += 1;

        if let Err(reason) = feed_line(&mut aggregator, &buf) {
            debug!("Skipping line {}: {}", lines_read, reason);
            skipped.record(reason);
        }

        if lines_read % LOGGING_INTERVAL_LINES == 0 {
            log_progress(start_time, lines_read, aggregator.captures());
        }
    }

    let elapsed_seconds = start_time.elapsed().as_secs_f64();
    print_skip_statistics(&skipped);
    print_run_summary(
        lines_read,
        aggregator.captures(),
        skipped.total(),
        elapsed_seconds,
    );

    Ok(SummaryRun {
        report: aggregator.snapshot(),
        lines_read,
        skipped,
        elapsed_seconds,
    })
}

fn open_input(path: &Path) -> Result<Box<dyn BufRead>> {
    if path.as_os_str().is_empty() || path == Path::new(STDIN_PATH) {
        info!("Reading from stdin");
        return Ok(Box::new(io::stdin().lock()));
    }
    let file = File::open(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    info!("Reading {}", path.display());
    Ok(Box::new(BufReader::new(file)))
}

/// Summarizes the file named by `config.file` (`-` for stdin).
///
/// # Errors
///
/// Returns an error if the input cannot be opened or read.
pub fn summarize_path(config: &Config) -> Result<SummaryRun> {
    let reader = open_input(&config.file)?;
    summarize(reader, config)
}

/// Loads a raw JSON report and re-materializes it under `config`.
///
/// The top-host list is re-ranked and truncated to `config.top_hosts`; the
/// rest of the report comes back unchanged.
///
/// # Errors
///
/// Returns an error if the input cannot be read or is not a well-formed
/// report.
pub fn load_report<R: Read>(reader: R, config: &Config) -> Result<RawReport> {
    let report = RawReport::from_reader(reader).context("Failed to load JSON report")?;
    let mut aggregator = StreamAggregator::from_config(config);
    aggregator.restore(report);
    Ok(aggregator.snapshot())
}

/// Loads the raw JSON report named by `config.file` (`-` for stdin).
///
/// # Errors
///
/// Returns an error if the input cannot be opened, read, or parsed.
pub fn load_report_path(config: &Config) -> Result<RawReport> {
    let reader = open_input(&config.file)?;
    load_report(reader, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Dialect;

    const LINE_A: &str = "com,example)/ 20190304050607 http://example.com/ text/html 200 AAAA - - 1234 5 item.warc.gz";
    const LINE_B: &str = "com,example)/about 20200101000000 http://example.com/about text/html 404 BBBB - - 100 6 item.warc.gz";

    fn config() -> Config {
        Config {
            sample_seed: Some(1),
            ..Default::default()
        }
    }

    #[test]
    fn test_summarize_counts_and_skips() {
        let input = format!(" CDX N b a m s k r M S V g\n{LINE_A}\n\nnot a cdx line\n{LINE_B}\r\n");
        let run = summarize(input.as_bytes(), &config()).unwrap();
        assert_eq!(run.lines_read, 5);
        assert_eq!(run.report.captures, 2);
        assert_eq!(run.report.urls, 2);
        assert_eq!(run.report.hosts, 1);
        assert_eq!(run.report.bytes, 1334);
        assert_eq!(run.skipped.count(SkipReason::Header), 1);
        assert_eq!(run.skipped.count(SkipReason::BlankLine), 1);
        assert_eq!(run.skipped.count(SkipReason::Malformed), 1);
        assert_eq!(run.skipped.total(), 3);
    }

    #[test]
    fn test_summarize_skips_invalid_utf8() {
        let mut input = Vec::new();
        input.extend_from_slice(LINE_A.as_bytes());
        input.extend_from_slice(b"\n\xff\xfe bad\n");
        let run = summarize(input.as_slice(), &config()).unwrap();
        assert_eq!(run.report.captures, 1);
        assert_eq!(run.skipped.count(SkipReason::InvalidUtf8), 1);
    }

    #[test]
    fn test_feed_line_skip_reasons() {
        let mut aggregator = StreamAggregator::from_config(&config());
        assert_eq!(
            feed_line(&mut aggregator, b"\xff\xfe\n"),
            Err(SkipReason::InvalidUtf8)
        );
        assert_eq!(feed_line(&mut aggregator, b"  \r\n"), Err(SkipReason::BlankLine));
        assert_eq!(
            feed_line(&mut aggregator, b"com,example/ junk\n"),
            Err(SkipReason::Malformed)
        );
        assert_eq!(feed_line(&mut aggregator, LINE_A.as_bytes()), Ok(()));
        assert_eq!(aggregator.captures(), 1);
    }

    #[test]
    fn test_summarize_last_line_without_newline() {
        let run = summarize(LINE_A.as_bytes(), &config()).unwrap();
        assert_eq!(run.lines_read, 1);
        assert_eq!(run.report.captures, 1);
    }

    #[test]
    fn test_summarize_empty_input() {
        let run = summarize(&b""[..], &config()).unwrap();
        assert_eq!(run.lines_read, 0);
        assert_eq!(run.report.captures, 0);
        assert_eq!(run.report.first, "");
        assert!(run.report.samples.is_empty());
    }

    #[test]
    fn test_summarize_legacy_field_count() {
        let config = Config {
            dialect: Dialect::Legacy,
            ..config()
        };
        let input = format!("{LINE_A}\ncom,example)/ 20190304050607 http://example.com/\n");
        let run = summarize(input.as_bytes(), &config).unwrap();
        assert_eq!(run.report.captures, 1);
        assert_eq!(run.skipped.count(SkipReason::FieldCount), 1);
    }

    #[test]
    fn test_summarize_read_error_aborts() {
        struct Failing;
        impl Read for Failing {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::Other, "device gone"))
            }
        }
        let result = summarize(BufReader::new(Failing), &config());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_report_truncates_top_hosts() {
        let json = r#"{"captures":6,"urls":3,"hosts":3,"bytes":0,"first":"20190101000000","last":"20190101000000",
            "tophosts":{"org,b":1,"com,a":3,"net,c":2},"mimestatus":{},"pathquery":{},"yearmonth":{},"samples":[]}"#;
        let config = Config {
            top_hosts: Some(2),
            ..config()
        };
        let report = load_report(json.as_bytes(), &config).unwrap();
        assert_eq!(report.tophosts.len(), 2);
        assert_eq!(report.tophosts.get("com,a"), Some(3));
        assert_eq!(report.tophosts.get("net,c"), Some(2));
        assert_eq!(report.captures, 6);
    }

    #[test]
    fn test_load_report_rejects_malformed() {
        let result = load_report(&b"{\"captures\":1}"[..], &config());
        assert!(result.is_err());
    }

    #[test]
    fn test_summarize_path_missing_file() {
        let config = Config {
            file: "/nonexistent/item.cdx".into(),
            ..config()
        };
        let err = summarize_path(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to open input file"));
    }
}
