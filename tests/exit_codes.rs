//! Tests for the binary's exit status and output.

mod helpers;

use std::process::Command;

use tempfile::TempDir;

use helpers::{write_fixture, SAMPLE_CDX};

fn cdx_summary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_cdx-summary"))
}

#[test]
fn test_missing_file_exits_with_one() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output = cdx_summary()
        .arg(temp_dir.path().join("absent.cdx"))
        .args(["--log-level", "error"])
        .output()
        .expect("Failed to run binary");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("cdx-summary error"));
    assert!(stderr.contains("Failed to open input file"));
}

#[test]
fn test_summary_written_to_out_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_fixture(temp_dir.path(), "item.cdx", SAMPLE_CDX);
    let out = temp_dir.path().join("summary.json");

    let status = cdx_summary()
        .arg(&input)
        .arg("-o")
        .arg(&out)
        .args(["--seed", "1", "--log-level", "error"])
        .status()
        .expect("Failed to run binary");
    assert!(status.success());

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&out).expect("no output"))
            .expect("invalid JSON");
    assert_eq!(json["captures"], 6);
    assert_eq!(json["mimestatus"]["HTML"]["2XX"], 3);
}

#[test]
fn test_report_then_load() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_fixture(temp_dir.path(), "item.cdx", SAMPLE_CDX);

    let report = cdx_summary()
        .arg(&input)
        .args(["--report", "--seed", "1", "--log-level", "error"])
        .output()
        .expect("Failed to run binary");
    assert!(report.status.success());
    let raw: serde_json::Value = serde_json::from_slice(&report.stdout).expect("invalid JSON");
    assert_eq!(raw["tophosts"]["com,example"], 5);
    assert_eq!(raw["mimestatus"]["text/html"]["200"], 3);

    let saved = temp_dir.path().join("report.json");
    std::fs::write(&saved, &report.stdout).expect("Failed to save report");

    let summary = cdx_summary()
        .arg(&saved)
        .args(["--load", "--log-level", "error"])
        .output()
        .expect("Failed to run binary");
    assert!(summary.status.success());
    let json: serde_json::Value = serde_json::from_slice(&summary.stdout).expect("invalid JSON");
    assert_eq!(json["tophosts"]["example.com"], 5);
    assert_eq!(json["captures"], 6);
}

#[test]
fn test_load_malformed_report_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let saved = write_fixture(temp_dir.path(), "report.json", "{\"captures\": 1}");

    let output = cdx_summary()
        .arg(&saved)
        .args(["--load", "--log-level", "error"])
        .output()
        .expect("Failed to run binary");
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to load JSON report"));
}
