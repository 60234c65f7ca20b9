//! Report writers.
//!
//! Every writer takes an explicit `Write` sink; nothing here binds to a
//! global stream.

use std::fs::File;
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Wrapper that treats a closed downstream pipe as success.
///
/// Lets `cdx-summary item.cdx | head` exit cleanly.
pub struct IgnoreBrokenPipe<W: Write> {
    inner: W,
}

impl<W: Write> IgnoreBrokenPipe<W> {
    /// Wraps `inner`.
    pub fn new(inner: W) -> Self {
        Self { inner }
    }
}

impl<W: Write> Write for IgnoreBrokenPipe<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(buf.len())
            } else {
                Err(e)
            }
        })
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().or_else(|e| {
            if e.kind() == ErrorKind::BrokenPipe {
                Ok(())
            } else {
                Err(e)
            }
        })
    }
}

/// Opens the output sink: the given file, or stdout when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be created.
pub fn open_sink(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(IgnoreBrokenPipe::new(io::stdout().lock()))),
    }
}

/// Writes `value` as one line of compact JSON and flushes the sink.
///
/// # Errors
///
/// Returns an error if serialization or the write fails.
pub fn write_json<W: Write, T: Serialize>(mut writer: W, value: &T) -> Result<()> {
    serde_json::to_writer(&mut writer, value).context("Failed to serialize report")?;
    writeln!(writer).context("Failed to write report")?;
    writer.flush().context("Failed to flush report output")?;
    Ok(())
}
