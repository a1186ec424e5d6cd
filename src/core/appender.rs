//! Sink trait shared by the file and console outputs of a handle

use super::{error::Result, log_entry::LogEntry};

/// One output of a [`LoggerHandle`](super::LoggerHandle).
///
/// Entries reaching an appender have already passed the severity filter.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;

    /// Push buffered output to its destination; file sinks also sync to disk
    fn flush(&mut self) -> Result<()>;

    fn name(&self) -> &str;
}
