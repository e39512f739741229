//! Line-oriented output sinks
//!
//! Demonstration callables write through these; the registry only ever sees
//! the callables.

use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
#[cfg(test)]
use std::sync::Mutex;

/// Destination for whole lines of text
pub trait LineSink: Send + Sync {
    fn write_line(&self, line: &str) -> Result<()>;
}

/// Write a line, logging instead of propagating a failure
///
/// Used by callables whose signature has no room for an error.
pub fn emit(sink: &dyn LineSink, line: &str) {
    if let Err(e) = sink.write_line(line) {
        log::warn!("Dropped output line: {:#}", e);
    }
}

/// Prefix a line with the local time, `"<time> : <text>"`
pub fn stamp(text: &str) -> String {
    format!("{} : {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"), text)
}

/// Standard output
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl LineSink for ConsoleSink {
    fn write_line(&self, line: &str) -> Result<()> {
        let mut out = io::stdout().lock();
        writeln!(out, "{}", line).context("Failed to write to stdout")
    }
}

/// Append-only text file, opened per line
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LineSink for FileSink {
    fn write_line(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("Failed to open log file: {:?}", self.path))?;
        writeln!(file, "{}", line)
            .with_context(|| format!("Failed to append to log file: {:?}", self.path))?;
        log::trace!("Appended line to {:?}", self.path);
        Ok(())
    }
}

/// Collects lines in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

#[cfg(test)]
impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
impl LineSink for MemorySink {
    fn write_line(&self, line: &str) -> Result<()> {
        self.lines
            .lock()
            .map_err(|_| anyhow::anyhow!("memory sink lock poisoned"))?
            .push(line.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_file_sink_appends() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("log.txt"));

        sink.write_line("first").unwrap();
        sink.write_line("second").unwrap();

        let content = fs::read_to_string(sink.path()).unwrap();
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_file_sink_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let sink = FileSink::new(dir.path().join("missing").join("log.txt"));
        assert!(sink.write_line("lost").is_err());
    }

    #[test]
    fn test_stamp_format() {
        let line = stamp("hello");
        assert!(line.ends_with(" : hello"));
        // "YYYY-MM-DD HH:MM:SS"
        assert_eq!(line.len(), "2024-01-01 00:00:00 : hello".len());
    }

    #[test]
    fn test_memory_sink() {
        let sink = MemorySink::new();
        emit(&sink, "a");
        emit(&sink, "b");
        assert_eq!(sink.lines(), vec!["a", "b"]);
    }
}
