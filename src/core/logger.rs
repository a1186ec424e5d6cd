//! Per-path logger handle
//!
//! A handle owns the two sinks bound to one destination path and the
//! threshold copied from configuration when it was built. Filtering happens
//! once, before either sink sees the event, so the file and the console
//! always agree on which events were recorded.

use super::{
    appender::Appender, config::LogConfig, log_entry::LogEntry, log_level::LogLevel,
    metrics::LoggerMetrics,
};
use crate::appenders::{ConsoleAppender, RotatingFileAppender};
use crate::core::encoder::JsonEncoder;
use crate::core::timestamp::TimestampLayout;
use chrono::Local;
use parking_lot::Mutex;
use std::path::{Path, PathBuf};

/// Whether the file sink of a handle could be constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandleStatus {
    Healthy,
    /// The file sink is missing; events still reach the console
    Degraded { reason: String },
}

pub struct LoggerHandle {
    path: PathBuf,
    min_level: LogLevel,
    file: Mutex<Option<RotatingFileAppender>>,
    console: Mutex<ConsoleAppender>,
    status: HandleStatus,
    metrics: LoggerMetrics,
}

impl LoggerHandle {
    /// Build the handle for `path` from `config`.
    ///
    /// Never fails: if the file sink cannot be opened the handle is returned
    /// degraded and keeps writing to the console.
    pub fn open(path: impl AsRef<Path>, config: &LogConfig, console: ConsoleAppender) -> Self {
        let path = path.as_ref().to_path_buf();
        let file = RotatingFileAppender::with_policy(&path, config.rotation_policy())
            .map(|appender| {
                appender.with_encoder(JsonEncoder::new(TimestampLayout::new(
                    config.timezone.clone(),
                )))
            });

        match file {
            Ok(appender) => Self::with_sinks(path, config.min_level(), Some(appender), console),
            Err(e) => {
                eprintln!("[ERROR] File sink for {} unavailable: {}", path.display(), e);
                let mut handle = Self::with_sinks(path, config.min_level(), None, console);
                handle.status = HandleStatus::Degraded {
                    reason: e.to_string(),
                };
                handle
            }
        }
    }

    /// Assemble a handle from already built sinks
    pub fn with_sinks(
        path: impl Into<PathBuf>,
        min_level: LogLevel,
        file: Option<RotatingFileAppender>,
        console: ConsoleAppender,
    ) -> Self {
        let status = match file {
            Some(_) => HandleStatus::Healthy,
            None => HandleStatus::Degraded {
                reason: "no file sink".to_string(),
            },
        };

        Self {
            path: path.into(),
            min_level,
            file: Mutex::new(file),
            console: Mutex::new(console),
            status,
            metrics: LoggerMetrics::new(),
        }
    }

    /// Record one event in both sinks, or in neither when it is below the
    /// threshold. The file sink is flushed and synced before returning.
    pub fn emit(&self, level: LogLevel, message: impl Into<String>) {
        if level < self.min_level {
            self.metrics.record_filtered();
            return;
        }

        let entry = self.write_file(LogEntry::new(level, message));
        self.write_console(&entry);
        self.metrics.record_logged();
    }

    /// Stamp and write `entry` while holding the file lock, so the `time`
    /// field follows write order. Returns the stamped entry.
    fn write_file(&self, entry: LogEntry) -> LogEntry {
        let mut file = self.file.lock();
        let entry = entry.with_timestamp(Local::now());
        let Some(appender) = file.as_mut() else {
            self.metrics.record_failed_write();
            return entry;
        };

        let rotations_before = appender.rotation_count();
        if let Err(e) = appender.append(&entry).and_then(|_| appender.flush()) {
            eprintln!("[ERROR] Write to {} failed: {}", self.path.display(), e);
            self.metrics.record_failed_write();
        }
        if appender.rotation_count() > rotations_before {
            self.metrics.record_rotation();
        }
        entry
    }

    fn write_console(&self, entry: &LogEntry) {
        let mut console = self.console.lock();
        if let Err(e) = console.append(entry).and_then(|_| console.flush()) {
            eprintln!("[ERROR] Console write failed: {}", e);
            self.metrics.record_failed_write();
        }
    }

    pub fn debug(&self, message: impl Into<String>) {
        self.emit(LogLevel::Debug, message);
    }

    pub fn info(&self, message: impl Into<String>) {
        self.emit(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl Into<String>) {
        self.emit(LogLevel::Warn, message);
    }

    pub fn error(&self, message: impl Into<String>) {
        self.emit(LogLevel::Error, message);
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    #[must_use]
    pub fn status(&self) -> &HandleStatus {
        &self.status
    }

    #[must_use]
    pub fn is_degraded(&self) -> bool {
        matches!(self.status, HandleStatus::Degraded { .. })
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }
}

impl std::fmt::Debug for LoggerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoggerHandle")
            .field("path", &self.path)
            .field("min_level", &self.min_level)
            .field("status", &self.status)
            .finish()
    }
}
