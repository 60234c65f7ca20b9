//! Error type definitions.
//!
//! This module defines the error types used throughout the library and the
//! reasons an input line can be skipped.

use log::SetLoggerError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),
}

/// A CDX line that does not have the expected column structure.
///
/// Always skippable: the caller drops the line and keeps going.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The line does not match the variable-length CDX grammar.
    #[error("Invalid CDX line: '{0}'")]
    Malformed(String),

    /// A legacy line with other than 11 fields.
    #[error("Expected {expected} CDX fields, found {found}", expected = crate::parse::LEGACY_FIELD_COUNT)]
    FieldCount {
        /// Number of whitespace-separated fields on the line
        found: usize,
    },

    /// The line bytes are not valid UTF-8.
    #[error("CDX line is not valid UTF-8")]
    InvalidUtf8,
}

/// A serialized report that is missing keys or has values of the wrong shape.
///
/// There is no partial recovery: the whole load fails.
#[derive(Error, Debug)]
#[error("Malformed report: {0}")]
pub struct MalformedReportError(#[from] serde_json::Error);

/// Why an input line was dropped instead of being aggregated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum SkipReason {
    /// Empty or whitespace-only line
    BlankLine,
    /// The ` CDX ...` field legend at the top of a CDX file
    Header,
    /// Line does not match the CDX grammar
    Malformed,
    /// Legacy line with the wrong number of fields
    FieldCount,
    /// Line is not valid UTF-8
    InvalidUtf8,
}

impl SkipReason {
    /// Returns a human-readable string representation of the skip reason.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::BlankLine => "Blank line",
            SkipReason::Header => "CDX header line",
            SkipReason::Malformed => "Malformed CDX line",
            SkipReason::FieldCount => "Wrong CDX field count",
            SkipReason::InvalidUtf8 => "Invalid UTF-8",
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&ParseError> for SkipReason {
    fn from(err: &ParseError) -> Self {
        match err {
            ParseError::Malformed(_) => SkipReason::Malformed,
            ParseError::FieldCount { .. } => SkipReason::FieldCount,
            ParseError::InvalidUtf8 => SkipReason::InvalidUtf8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_all_skip_reasons_have_string_representation() {
        for reason in SkipReason::iter() {
            let str_repr = reason.as_str();
            assert!(
                !str_repr.is_empty(),
                "{:?} should have non-empty string",
                reason
            );
        }
    }

    #[test]
    fn test_parse_error_maps_to_skip_reason() {
        assert_eq!(
            SkipReason::from(&ParseError::Malformed("x".into())),
            SkipReason::Malformed
        );
        assert_eq!(
            SkipReason::from(&ParseError::FieldCount { found: 3 }),
            SkipReason::FieldCount
        );
        assert_eq!(
            SkipReason::from(&ParseError::InvalidUtf8),
            SkipReason::InvalidUtf8
        );
    }

    #[test]
    fn test_parse_error_messages() {
        assert_eq!(
            ParseError::FieldCount { found: 9 }.to_string(),
            "Expected 11 CDX fields, found 9"
        );
        assert_eq!(
            ParseError::Malformed("foo".into()).to_string(),
            "Invalid CDX line: 'foo'"
        );
    }

    #[test]
    fn test_malformed_report_error_wraps_serde() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let wrapped = MalformedReportError::from(err);
        assert!(wrapped.to_string().starts_with("Malformed report:"));
    }
}
