//! Logger initialization.
//!
//! Log lines go to stderr so they never mix with a report written to stdout.
//! Records from this crate are labelled with their module (`run`,
//! `aggregate`, ...) instead of the full `cdx_summary::...` path.

use std::io::{IsTerminal, Write};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::{Level, LevelFilter};

const CRATE_TARGET: &str = "cdx_summary";

/// Module label of a log target: `cdx_summary::run` becomes `run`, the crate
/// root becomes `cdx_summary`, and foreign targets are kept as they are.
fn module_label(target: &str) -> &str {
    target
        .strip_prefix(CRATE_TARGET)
        .and_then(|rest| rest.strip_prefix("::"))
        .unwrap_or(target)
}

fn level_marker(level: Level) -> (&'static str, ColoredString) {
    let label = level.to_string();
    match level {
        Level::Error => ("❌", label.red()),
        Level::Warn => ("⚠️", label.yellow()),
        Level::Info => ("✔️", label.green()),
        Level::Debug => ("🔍", label.blue()),
        Level::Trace => ("🔬", label.purple()),
    }
}

/// One JSON log line (without the trailing newline).
fn json_line(ts_millis: i64, level: Level, target: &str, msg: &str) -> String {
    serde_json::json!({
        "ts": ts_millis,
        "level": level.as_str(),
        "module": module_label(target),
        "msg": msg,
    })
    .to_string()
}

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first; `level` then overrides it for this crate, so
/// `--log-level` always wins over the environment.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already
/// installed.
///
/// # Examples
///
/// ```bash
/// # JSON lines on stderr, report on stdout
/// cdx-summary item.cdx --log-format json 2>log.jsonl
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(std::io::stderr().is_terminal());

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module(CRATE_TARGET, level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let line = json_line(
                    chrono::Utc::now().timestamp_millis(),
                    record.level(),
                    record.target(),
                    &record.args().to_string(),
                );
                writeln!(buf, "{}", line)
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let (marker, level) = level_marker(record.level());
                writeln!(
                    buf,
                    "{} {} [{}] {}",
                    marker,
                    module_label(record.target()).cyan(),
                    level,
                    record.args()
                )
            });
        }
    }

    // try_init: tests may initialize more than once per process
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_label() {
        assert_eq!(module_label("cdx_summary::run"), "run");
        assert_eq!(module_label("cdx_summary::aggregate"), "aggregate");
        assert_eq!(module_label("cdx_summary"), "cdx_summary");
        assert_eq!(module_label("cdx_summary_extra::x"), "cdx_summary_extra::x");
        assert_eq!(module_label("env_logger"), "env_logger");
    }

    #[test]
    fn test_json_line_escapes_message() {
        let line = json_line(1_700_000_000_000, Level::Warn, "cdx_summary::aggregate", "a \"quoted\"\nline");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["ts"], 1_700_000_000_000_i64);
        assert_eq!(value["level"], "WARN");
        assert_eq!(value["module"], "aggregate");
        assert_eq!(value["msg"], "a \"quoted\"\nline");
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_level_marker_labels() {
        let (marker, label) = level_marker(Level::Error);
        assert_eq!(marker, "❌");
        assert!(label.to_string().contains("ERROR"));
    }

    // env_logger can only be installed once per process, so every call after
    // the first returns an error. Both outcomes are fine; panicking is not.

    #[test]
    fn test_init_logger_json_format() {
        let result = init_logger_with(LevelFilter::Debug, LogFormat::Json);
        assert!(result.is_ok() || result.is_err());
    }

    #[test]
    fn test_second_init_fails_without_panicking() {
        let _ = init_logger_with(LevelFilter::Warn, LogFormat::Plain);
        let result = init_logger_with(LevelFilter::Trace, LogFormat::Plain);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
    }
}
