//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `cdx_summary` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Choosing between the raw report and the bucketed summary
//!
//! All core functionality is implemented in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use cdx_summary::initialization::init_logger_with;
use cdx_summary::output::{open_sink, write_json};
use cdx_summary::{bucket_report, load_report_path, summarize_path, Config, Opt, RawReport};

fn build_report(opt: &Opt, config: &Config) -> Result<RawReport> {
    if opt.load {
        load_report_path(config)
    } else {
        Ok(summarize_path(config)?.report)
    }
}

fn run(opt: &Opt, config: &Config) -> Result<()> {
    let report = build_report(opt, config)?;
    let sink = open_sink(opt.out.as_deref())?;
    if opt.report {
        write_json(sink, &report)
    } else {
        write_json(sink, &bucket_report(&report))
    }
}

fn main() -> Result<()> {
    let opt = Opt::parse();
    let config = Config::from(&opt);

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    if let Err(e) = run(&opt, &config) {
        eprintln!("cdx-summary error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
