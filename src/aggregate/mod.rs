//! Streaming aggregation of CDX records.
//!
//! [`StreamAggregator`] owns every running counter of a pass over a CDX
//! stream. Memory grows with the number of distinct hosts, MIME/status pairs,
//! bucket pairs, and years, plus the sample capacity, but never with the
//! number of lines.
//!
//! "Unique" URL and host counts are transition counts: a key counts once each
//! time it differs from the immediately preceding parsed record. On a sorted
//! CDX file this equals the number of distinct keys.
//!
//! Partial reports from disjoint shards can be combined by summing counters
//! and tables and taking min/max of `first`/`last`, but the sample cannot be
//! reproduced that way because the sampler is position dependent.

mod counter;
mod report;

use std::collections::HashMap;

use log::{debug, warn};

use crate::config::Config;
use crate::error_handling::ParseError;
use crate::parse::{parse_line, CaptureRecord, Dialect};
use crate::sampler::Sampler;

pub use counter::NestedCounter;
pub use report::{RawReport, ReportTables, TopHosts};

/// Running state of a single pass over a CDX stream.
#[derive(Debug)]
pub struct StreamAggregator {
    dialect: Dialect,
    max_hosts: Option<usize>,
    sampler: Sampler,
    captures: u64,
    urls: u64,
    hosts: u64,
    bytes: u64,
    first: Option<String>,
    last: Option<String>,
    prev_surt: Option<String>,
    prev_host: Option<String>,
    host_counts: HashMap<String, u64>,
    mimestatus: NestedCounter,
    pathquery: NestedCounter,
    yearmonth: NestedCounter,
}

impl StreamAggregator {
    /// Creates an empty aggregator.
    ///
    /// * `dialect` - line layout of the input
    /// * `max_hosts` - top hosts kept in snapshots (`None` keeps all)
    /// * `sampler` - sampling strategy
    pub fn new(dialect: Dialect, max_hosts: Option<usize>, sampler: Sampler) -> Self {
        Self {
            dialect,
            max_hosts,
            sampler,
            captures: 0,
            urls: 0,
            hosts: 0,
            bytes: 0,
            first: None,
            last: None,
            prev_surt: None,
            prev_host: None,
            host_counts: HashMap::new(),
            mimestatus: NestedCounter::new(),
            pathquery: NestedCounter::new(),
            yearmonth: NestedCounter::new(),
        }
    }

    /// Creates an aggregator from the library configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.dialect,
            config.top_hosts,
            Sampler::new(config.sample_size, config.sample_seed),
        )
    }

    /// Dialect used to parse lines.
    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Records parsed so far.
    pub fn captures(&self) -> u64 {
        self.captures
    }

    /// Parses one line and, on success, aggregates it.
    ///
    /// # Errors
    ///
    /// Returns the [`ParseError`] of a line that does not parse. No counter is
    /// touched in that case, so the caller can simply move on.
    pub fn process_line(&mut self, line: &str) -> Result<(), ParseError> {
        let record = parse_line(line, self.dialect)?;
        self.ingest(&record);
        Ok(())
    }

    /// Feeds every line of `lines`, skipping the ones that do not parse.
    ///
    /// Returns the number of skipped lines.
    pub fn consume<I, S>(&mut self, lines: I) -> u64
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut skipped = 0;
        for line in lines {
            if let Err(e) = self.process_line(line.as_ref()) {
                debug!("Skipping line: {}", e);
                skipped += 1;
            }
        }
        skipped
    }

    /// Aggregates one parsed record.
    pub fn ingest(&mut self, record: &CaptureRecord) {
        self.captures += 1;

        if self.prev_surt.as_deref() != Some(record.surt.as_str()) {
            self.prev_surt = Some(record.surt.clone());
            self.urls += 1;
        }
        if self.prev_host.as_deref() != Some(record.host.as_str()) {
            self.prev_host = Some(record.host.clone());
            self.hosts += 1;
        }

        // 14-digit zero-padded timestamps order lexicographically.
        if self.first.as_deref().map_or(true, |f| record.timestamp.as_str() < f) {
            self.first = Some(record.timestamp.clone());
        }
        if self.last.as_deref().map_or(true, |l| record.timestamp.as_str() > l) {
            self.last = Some(record.timestamp.clone());
        }

        if let Some(size) = record.payload_size() {
            self.add_bytes(size);
        }

        match self.host_counts.get_mut(&record.host) {
            Some(count) => *count += 1,
            None => {
                self.host_counts.insert(record.host.clone(), 1);
            }
        }

        self.mimestatus.increment(&record.mime, &record.status);
        if self.dialect == Dialect::Standard {
            self.pathquery
                .increment(&record.path_bucket(), &record.query_bucket());
            self.yearmonth.increment(record.year(), record.month());
        }

        self.sampler.offer(record);
    }

    /// Adds to the byte total, saturating at `u64::MAX`.
    fn add_bytes(&mut self, size: u64) {
        match self.bytes.checked_add(size) {
            Some(total) => self.bytes = total,
            None => {
                if self.bytes != u64::MAX {
                    warn!(
                        "Byte total overflowed at capture {}, saturating at {}",
                        self.captures,
                        u64::MAX
                    );
                }
                self.bytes = u64::MAX;
            }
        }
    }

    /// Hosts ordered by descending count, ties by ascending host key,
    /// truncated to `max_hosts`.
    fn top_hosts(&self) -> TopHosts {
        let mut ranked: Vec<(&String, &u64)> = self.host_counts.iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
        let limit = self.max_hosts.unwrap_or(ranked.len());
        TopHosts(
            ranked
                .into_iter()
                .take(limit)
                .map(|(host, count)| (host.clone(), *count))
                .collect(),
        )
    }

    /// Materializes the current state as an independent [`RawReport`].
    ///
    /// Can be called at any point of a pass; the aggregator stays usable.
    pub fn snapshot(&self) -> RawReport {
        let tables = match self.dialect {
            Dialect::Standard => ReportTables::Full {
                mimestatus: self.mimestatus.clone(),
                pathquery: self.pathquery.clone(),
                yearmonth: self.yearmonth.clone(),
            },
            Dialect::Legacy => ReportTables::Legacy {
                media: self.mimestatus.clone(),
            },
        };
        RawReport {
            captures: self.captures,
            urls: self.urls,
            hosts: self.hosts,
            bytes: self.bytes,
            first: self.first.clone().unwrap_or_default(),
            last: self.last.clone().unwrap_or_default(),
            tophosts: self.top_hosts(),
            tables,
            samples: self.sampler.samples(),
        }
    }

    /// Repopulates counters, tables, host table, and samples from `report`.
    ///
    /// This is a read-only reconstruction for redisplay, not a resumable
    /// session: the sampler becomes a frozen copy of the saved samples and the
    /// previous-key state for transition counting is cleared. The dialect
    /// follows the shape of the saved tables.
    pub fn restore(&mut self, report: RawReport) {
        self.captures = report.captures;
        self.urls = report.urls;
        self.hosts = report.hosts;
        self.bytes = report.bytes;
        self.first = Some(report.first).filter(|s| !s.is_empty());
        self.last = Some(report.last).filter(|s| !s.is_empty());
        self.prev_surt = None;
        self.prev_host = None;
        self.host_counts = report.tophosts.0.into_iter().collect();
        match report.tables {
            ReportTables::Full {
                mimestatus,
                pathquery,
                yearmonth,
            } => {
                self.dialect = Dialect::Standard;
                self.mimestatus = mimestatus;
                self.pathquery = pathquery;
                self.yearmonth = yearmonth;
            }
            ReportTables::Legacy { media } => {
                self.dialect = Dialect::Legacy;
                self.mimestatus = media;
                self.pathquery = NestedCounter::new();
                self.yearmonth = NestedCounter::new();
            }
        }
        self.sampler.restore(report.samples);
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
