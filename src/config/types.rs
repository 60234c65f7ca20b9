//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::constants::{DEFAULT_SAMPLE_SIZE, DEFAULT_TOP_HOSTS, STDIN_PATH};
use crate::parse::Dialect;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use cdx_summary::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     file: PathBuf::from("item.cdx"),
///     sample_size: 20,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// CDX file to read (`-` for stdin)
    pub file: PathBuf,

    /// Line dialect of the input
    pub dialect: Dialect,

    /// Number of sample memento URLs to keep (0 disables sampling)
    pub sample_size: usize,

    /// Number of top hosts to report (`None` keeps every host)
    pub top_hosts: Option<usize>,

    /// Seed for the sampler's random source (`None` seeds from the OS)
    pub sample_seed: Option<u64>,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            file: PathBuf::from(STDIN_PATH),
            dialect: Dialect::Standard,
            sample_size: DEFAULT_SAMPLE_SIZE,
            top_hosts: Some(DEFAULT_TOP_HOSTS),
            sample_seed: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// Command-line options of the `cdx-summary` binary.
#[derive(Debug, Parser)]
#[command(
    name = "cdx-summary",
    version,
    about = "Summarize web archive capture index (CDX) files."
)]
pub struct Opt {
    /// CDX file path (reads from stdin if empty or '-')
    pub input: Option<PathBuf>,

    /// Generate the non-summarized JSON report (every host, raw tables)
    #[arg(short, long)]
    pub report: bool,

    /// Load a JSON report instead of CDX
    #[arg(short, long)]
    pub load: bool,

    /// Parse the legacy fixed 11-field CDX dialect
    #[arg(long)]
    pub legacy: bool,

    /// Number of sample memento URLs in summary
    #[arg(short, long, default_value_t = DEFAULT_SAMPLE_SIZE, value_name = "N")]
    pub samples: usize,

    /// Number of hosts with maximum captures in summary
    #[arg(short, long, default_value_t = DEFAULT_TOP_HOSTS, value_name = "N")]
    pub tophosts: usize,

    /// Seed the sampler for reproducible samples
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Write output to the given file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub out: Option<PathBuf>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<&Opt> for Config {
    fn from(opt: &Opt) -> Self {
        Self {
            file: opt
                .input
                .clone()
                .unwrap_or_else(|| PathBuf::from(STDIN_PATH)),
            dialect: if opt.legacy {
                Dialect::Legacy
            } else {
                Dialect::Standard
            },
            sample_size: opt.samples,
            top_hosts: if opt.report { None } else { Some(opt.tophosts) },
            sample_seed: opt.seed,
            log_level: opt.log_level.clone(),
            log_format: opt.log_format.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            log::LevelFilter::from(LogLevel::Error),
            log::LevelFilter::Error
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Warn),
            log::LevelFilter::Warn
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Info),
            log::LevelFilter::Info
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Debug),
            log::LevelFilter::Debug
        );
        assert_eq!(
            log::LevelFilter::from(LogLevel::Trace),
            log::LevelFilter::Trace
        );
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.file, PathBuf::from("-"));
        assert_eq!(config.dialect, Dialect::Standard);
        assert_eq!(config.sample_size, DEFAULT_SAMPLE_SIZE);
        assert_eq!(config.top_hosts, Some(DEFAULT_TOP_HOSTS));
        assert!(config.sample_seed.is_none());
    }

    #[test]
    fn test_opt_defaults_to_stdin() {
        let opt = Opt::parse_from(["cdx-summary"]);
        let config = Config::from(&opt);
        assert_eq!(config.file, PathBuf::from("-"));
        assert_eq!(config.sample_size, 10);
        assert_eq!(config.top_hosts, Some(10));
    }

    #[test]
    fn test_opt_report_keeps_every_host() {
        let opt = Opt::parse_from(["cdx-summary", "--report", "-t", "3", "item.cdx"]);
        let config = Config::from(&opt);
        assert_eq!(config.top_hosts, None);
        assert_eq!(config.file, PathBuf::from("item.cdx"));
    }

    #[test]
    fn test_opt_legacy_and_seed() {
        let opt = Opt::parse_from(["cdx-summary", "--legacy", "--seed", "7", "-s", "0"]);
        let config = Config::from(&opt);
        assert_eq!(config.dialect, Dialect::Legacy);
        assert_eq!(config.sample_seed, Some(7));
        assert_eq!(config.sample_size, 0);
    }

    #[test]
    fn test_opt_rejects_unknown_log_level() {
        let result = Opt::try_parse_from(["cdx-summary", "--log-level", "loud"]);
        assert!(result.is_err());
    }
}
