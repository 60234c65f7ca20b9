// Shared test helpers for CDX fixtures.
//
// This module provides common utilities used across multiple test files to reduce duplication.

use std::path::{Path, PathBuf};

use cdx_summary::{Config, LogLevel};

/// A small sorted CDX file: two hosts, one repeated URL, one revisit, one
/// robots.txt capture.
#[allow(dead_code)] // Used by other test files
pub const SAMPLE_CDX: &str = " CDX N b a m s k r M S V g
com,example)/ 20190304050607 http://example.com:80/ text/html 200 AAAA - - 1000 0 item-0.warc.gz
com,example)/ 20190304060000 http://example.com/ text/html 404 BBBB - - 200 1000 item-0.warc.gz
com,example)/about 20200101000000 http://example.com/about text/html 200 CCCC - - 300 1200 item-0.warc.gz
com,example)/logo.png 20200101000001 http://example.com/logo.png image/png 200 DDDD - - 4000 1500 item-0.warc.gz
com,example)/robots.txt 20200101000002 http://example.com/robots.txt text/html 200 EEEE - - 50 5500 item-1.warc.gz
org,archive)/details?id=1&x=2 20211231235959 https://archive.org/details?id=1&x=2 warc/revisit - FFFF - - - - item-1.warc.gz
";

/// Writes `content` to `name` inside `dir` and returns the path.
#[allow(dead_code)] // Used by other test files
pub fn write_fixture(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

/// Config reading `file` with a fixed sampler seed and quiet logging.
#[allow(dead_code)] // Used by other test files
pub fn test_config(file: PathBuf) -> Config {
    Config {
        file,
        sample_seed: Some(42),
        log_level: LogLevel::Error,
        ..Default::default()
    }
}
