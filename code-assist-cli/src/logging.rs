//! Tracing setup for the binary
//!
//! stdout carries the MCP protocol while serving, so logs only ever go to
//! stderr or to the configured log file.

use anyhow::Context;
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, registry, EnvFilter};

/// A thread-safe writer that flushes and syncs every write to the log file
pub struct FileWriterGuard {
    file: Arc<Mutex<File>>,
}

impl FileWriterGuard {
    /// Creates a new `FileWriterGuard` wrapping the given file.
    pub fn new(file: Arc<Mutex<File>>) -> Self {
        Self { file }
    }

    fn lock(&self) -> std::io::Result<std::sync::MutexGuard<'_, File>> {
        self.file
            .lock()
            .map_err(|_| std::io::Error::other("log file mutex was poisoned"))
    }
}

impl Write for FileWriterGuard {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        let mut file = self.lock()?;
        let written = file.write(buf)?;
        file.flush()?;
        file.sync_all()?;
        Ok(written)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        let mut file = self.lock()?;
        file.flush()?;
        file.sync_all()
    }
}

/// Level selected by the global flags; `quiet` wins over `debug`, `debug` over `verbose`
pub fn log_level(verbose: bool, debug: bool, quiet: bool) -> Level {
    if quiet {
        Level::ERROR
    } else if debug {
        Level::DEBUG
    } else if verbose {
        Level::TRACE
    } else {
        Level::INFO
    }
}

fn create_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rmcp=warn,{level}")))
}

/// Install the global subscriber, writing to `log_file` when given and stderr otherwise
pub fn configure_logging(level: Level, log_file: Option<&Path>) -> anyhow::Result<()> {
    match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create log directory {}", parent.display())
                })?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {}", path.display()))?;
            let shared_file = Arc::new(Mutex::new(file));

            registry()
                .with(create_filter(level))
                .with(
                    fmt::layer()
                        .with_writer(move || FileWriterGuard::new(shared_file.clone()))
                        .with_ansi(false),
                )
                .try_init()
                .context("Failed to install log subscriber")?;
        }
        None => {
            registry()
                .with(create_filter(level))
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init()
                .context("Failed to install log subscriber")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_precedence() {
        assert_eq!(log_level(false, false, false), Level::INFO);
        assert_eq!(log_level(true, false, false), Level::TRACE);
        assert_eq!(log_level(true, true, false), Level::DEBUG);
        assert_eq!(log_level(true, true, true), Level::ERROR);
    }

    #[test]
    fn test_file_writer_guard_appends() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("test.log");
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .unwrap();
        let shared = Arc::new(Mutex::new(file));

        let mut first = FileWriterGuard::new(shared.clone());
        let mut second = FileWriterGuard::new(shared);
        first.write_all(b"one\n").unwrap();
        second.write_all(b"two\n").unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }
}
