//! CDX line parsing.
//!
//! Two dialects are supported:
//! - [`Dialect::Standard`]: 6 to 11 whitespace-separated fields
//!   (`surt timestamp url mime status digest [redirect] [meta] [bytes] [offset] [warc]`),
//!   matched with a single anchored regular expression.
//! - [`Dialect::Legacy`]: exactly 11 fields in the same order, split on whitespace.
//!
//! Parsing is a pure function; a [`ParseError`] means the line should be skipped.

mod record;

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error_handling::ParseError;

pub use record::CaptureRecord;
use record::{segment_count, split_surt};

/// Number of columns of a legacy CDX line.
pub const LEGACY_FIELD_COUNT: usize = 11;

static CDX_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<surt>(?P<host>[^)\s]+)\)(?P<path>[^?\s]+)?(\?(?P<query>\S+))?)",
        r"\s(?P<timestamp>\d{14})",
        r"\s(?P<url>\S+)",
        r"\s(?P<mime>\S+)",
        r"\s(?P<status>-|\d{3})",
        r"\s(?P<digest>\S+)",
        r"(\s(?P<redirect>[^\s\d]+))?",
        r"(\s(?P<metatags>[^\s\d]+))?",
        r"(\s(?P<bytes>-|\d+))?",
        r"(\s(?P<offset>-|\d+))?",
        r"(\s(?P<warcfile>\S+))?",
    ))
    .expect("CDX line pattern is valid")
});

/// Column layout of the input lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Variable-length lines (6 to 11 fields)
    #[default]
    Standard,
    /// Fixed 11-field lines
    Legacy,
}

/// Parses one raw CDX line in the given dialect.
///
/// # Errors
///
/// Returns [`ParseError::Malformed`] when a standard line does not match the
/// CDX grammar and [`ParseError::FieldCount`] when a legacy line does not have
/// exactly 11 fields.
pub fn parse_line(line: &str, dialect: Dialect) -> Result<CaptureRecord, ParseError> {
    match dialect {
        Dialect::Standard => parse_standard(line),
        Dialect::Legacy => parse_legacy(line),
    }
}

fn parse_standard(line: &str) -> Result<CaptureRecord, ParseError> {
    let line = line.trim();
    let caps = CDX_LINE
        .captures(line)
        .ok_or_else(|| ParseError::Malformed(line.to_string()))?;

    let field = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
    let required = |name: &str| field(name).unwrap_or_default();

    let path = required("path");
    let query = required("query");
    Ok(CaptureRecord {
        surt: required("surt"),
        host: required("host"),
        path_len: segment_count(&path, '/'),
        query_len: segment_count(&query, '&'),
        path,
        query,
        timestamp: required("timestamp"),
        url: required("url"),
        mime: required("mime"),
        status: required("status"),
        digest: required("digest"),
        redirect: field("redirect"),
        meta_tags: field("metatags"),
        bytes: field("bytes"),
        offset: field("offset"),
        warc_file: field("warcfile"),
    })
}

fn parse_legacy(line: &str) -> Result<CaptureRecord, ParseError> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    let &[surt, timestamp, url, mime, status, digest, redirect, meta_tags, bytes, offset, warc_file] =
        fields.as_slice()
    else {
        return Err(ParseError::FieldCount {
            found: fields.len(),
        });
    };

    let (host, path, query) = split_surt(surt);
    Ok(CaptureRecord {
        surt: surt.to_string(),
        host: host.to_string(),
        path: path.to_string(),
        query: query.to_string(),
        timestamp: timestamp.to_string(),
        url: url.to_string(),
        mime: mime.to_string(),
        status: status.to_string(),
        digest: digest.to_string(),
        redirect: Some(redirect.to_string()),
        meta_tags: Some(meta_tags.to_string()),
        bytes: Some(bytes.to_string()),
        offset: Some(offset.to_string()),
        warc_file: Some(warc_file.to_string()),
        path_len: segment_count(path, '/'),
        query_len: segment_count(query, '&'),
    })
}

impl FromStr for CaptureRecord {
    type Err = ParseError;

    /// Parses a standard-dialect line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_standard(s)
    }
}
