//! A bounded in-memory diagnostics sink that plugs into the `log` facade.
//!
//! `RingBufferLogger` keeps the most recent entries (oldest evicted first)
//! and can be installed as the global logger or handed around as an
//! injected `log::Log` sink - it is never a hard-wired singleton of the
//! engine.
//!
//! License: MIT OR Apache-2.0

use chrono::{DateTime, Utc};
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::sync::Mutex;

/// Maximum number of retained log entries.
pub const MAX_LOG_ENTRIES: usize = 5_000;

/// One captured log record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    pub level: Level,
    pub target: String,
    pub message: String,
}

/// A capped ring buffer of log entries behind a mutex.
#[derive(Debug)]
pub struct RingBufferLogger {
    entries: Mutex<VecDeque<LogEntry>>,
    capacity: usize,
    max_level: LevelFilter,
}

impl Default for RingBufferLogger {
    fn default() -> Self {
        Self::new(MAX_LOG_ENTRIES)
    }
}

impl RingBufferLogger {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(VecDeque::new()),
            capacity,
            max_level: LevelFilter::Debug,
        }
    }

    pub fn with_max_level(mut self, max_level: LevelFilter) -> Self {
        self.max_level = max_level;
        self
    }

    /// Installs a leaked logger instance as the global `log` sink and
    /// returns a handle for reading entries back.
    pub fn init(capacity: usize) -> anyhow::Result<&'static RingBufferLogger> {
        let logger: &'static RingBufferLogger = Box::leak(Box::new(Self::new(capacity)));
        log::set_logger(logger)?;
        log::set_max_level(logger.max_level);
        Ok(logger)
    }

    pub fn append(&self, level: Level, target: &str, message: String) {
        let entry = LogEntry {
            timestamp: Utc::now(),
            level,
            target: target.to_string(),
            message,
        };
        let mut entries = self.entries.lock().expect("log lock poisoned");
        entries.push_back(entry);
        while entries.len() > self.capacity {
            entries.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("log lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Entries newest-first.
    pub fn snapshot(&self) -> Vec<LogEntry> {
        let entries = self.entries.lock().expect("log lock poisoned");
        entries.iter().rev().cloned().collect()
    }

    /// Renders all entries, newest-first, one per line.
    pub fn formatted(&self) -> String {
        let mut out = String::new();
        for entry in self.snapshot() {
            let _ = writeln!(
                out,
                "[{}] [{}] [{}] {}",
                entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f"),
                entry.level.as_str(),
                entry.target,
                entry.message
            );
        }
        out
    }

    pub fn clear(&self) {
        self.entries.lock().expect("log lock poisoned").clear();
    }
}

impl Log for RingBufferLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.max_level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.append(record.level(), record.target(), record.args().to_string());
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_and_reads_newest_first() {
        let logger = RingBufferLogger::new(10);
        logger.append(Level::Info, "test", "first".to_string());
        logger.append(Level::Warn, "test", "second".to_string());

        let snapshot = logger.snapshot();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot[0].message, "second");
        assert_eq!(snapshot[1].message, "first");
    }

    #[test]
    fn evicts_oldest_beyond_capacity() {
        let logger = RingBufferLogger::new(3);
        for i in 0..5 {
            logger.append(Level::Debug, "test", format!("entry {i}"));
        }
        let snapshot = logger.snapshot();
        assert_eq!(snapshot.len(), 3);
        assert_eq!(snapshot[0].message, "entry 4");
        assert_eq!(snapshot[2].message, "entry 2");
    }

    #[test]
    fn formatted_output_contains_level_and_target() {
        let logger = RingBufferLogger::new(10);
        logger.append(Level::Error, "promptmask", "boom".to_string());
        let rendered = logger.formatted();
        assert!(rendered.contains("[ERROR]"));
        assert!(rendered.contains("[promptmask]"));
        assert!(rendered.contains("boom"));
    }

    #[test]
    fn clear_empties_the_buffer() {
        let logger = RingBufferLogger::new(10);
        logger.append(Level::Info, "test", "entry".to_string());
        logger.clear();
        assert!(logger.is_empty());
        assert!(logger.formatted().is_empty());
    }
}
