//! Raw report snapshot and its JSON form.

use std::fmt;
use std::io::Read;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::counter::NestedCounter;
use crate::error_handling::MalformedReportError;
use crate::sampler::Sample;

/// Hosts with the most captures, in descending count order.
///
/// Serializes as a JSON object whose key order is the ranking.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopHosts(pub Vec<(String, u64)>);

impl TopHosts {
    /// Number of listed hosts.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no host is listed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Capture count of `host`, if listed.
    pub fn get(&self, host: &str) -> Option<u64> {
        self.0.iter().find(|(h, _)| h == host).map(|(_, c)| *c)
    }

    /// Iterates `(host, count)` in ranking order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.0.iter().map(|(h, c)| (h.as_str(), *c))
    }

    /// Sum of the listed counts.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, c)| c).sum()
    }
}

impl Serialize for TopHosts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (host, count) in &self.0 {
            map.serialize_entry(host, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for TopHosts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct TopHostsVisitor;

        impl<'de> Visitor<'de> for TopHostsVisitor {
            type Value = TopHosts;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of host to capture count")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<TopHosts, A::Error> {
                let mut hosts = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((host, count)) = access.next_entry::<String, u64>()? {
                    hosts.push((host, count));
                }
                Ok(TopHosts(hosts))
            }
        }

        deserializer.deserialize_map(TopHostsVisitor)
    }
}

/// Distribution tables of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReportTables {
    /// Tables of the standard dialect.
    Full {
        /// MIME type → status → count
        mimestatus: NestedCounter,
        /// Path bucket → query bucket → count
        pathquery: NestedCounter,
        /// Year → month → count
        yearmonth: NestedCounter,
    },
    /// The single table of the legacy dialect.
    Legacy {
        /// MIME type → status → count
        media: NestedCounter,
    },
}

/// Snapshot of the aggregator state.
///
/// Field names are the JSON keys of the report and must not change, or saved
/// reports will no longer load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReport {
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
    /// Hosts with the most captures, reverse-domain keys
    pub tophosts: TopHosts,
    /// Distribution tables
    #[serde(flatten)]
    pub tables: ReportTables,
    /// Sampled `(timestamp, url)` pairs
    pub samples: Vec<Sample>,
}

impl RawReport {
    /// Parses a JSON report.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedReportError`] when any key is missing or renamed,
    /// or when a value has the wrong shape. Nothing is partially recovered.
    pub fn from_json(json: &str) -> Result<Self, MalformedReportError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a JSON report from `reader`.
    ///
    /// # Errors
    ///
    /// Same as [`RawReport::from_json`]; I/O failures surface as the same error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, MalformedReportError> {
        Ok(serde_json::from_reader(reader)?)
    }
}
