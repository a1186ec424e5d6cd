//! # necrolog
//!
//! Per-path structured logging. Every event is written to a rotating,
//! gzip-compressing JSON-lines file and echoed as a colorized console line,
//! subject to one process-wide minimum severity. A retention enforcer keeps
//! the log directory small by deleting everything except a short whitelist
//! of protected logs, which are themselves capped in size.
//!
//! ## Features
//!
//! - **One handle per path**: handles are built lazily and shared safely
//!   across threads through a [`Registry`]
//! - **Durable writes**: each event is flushed and synced before `emit` returns
//! - **Aggressive rotation**: tiny segments, compressed backups, bounded count
//! - **Retention**: whitelist plus size cap, every action logged back
//!   through the facility
//! - **Ingestion**: JSON request decoding, plus an HTTP endpoint and the
//!   `necrologctl` poster behind the `http` feature

pub mod appenders;
pub mod core;
pub mod ingest;
pub mod layout;
pub mod macros;
#[cfg(feature = "http")]
pub mod poster;
pub mod retention;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
    pub use crate::core::{
        Appender, HandleStatus, LogConfig, LogEntry, LogLevel, LoggerError, LoggerHandle,
        LoggerMetrics, Registry, Result,
    };
    pub use crate::retention::{RetentionEnforcer, RetentionPolicy, WhitelistSet};
}

pub use appenders::{ConsoleAppender, RotatingFileAppender, RotationPolicy};
pub use core::{
    Appender, ColorConsoleEncoder, EventEncoder, HandleStatus, JsonEncoder, LogConfig, LogEntry,
    LogLevel, LoggerError, LoggerHandle, LoggerMetrics, Registry, Result, TimestampLayout,
};
pub use ingest::{ingest, LogRequest};
pub use retention::{
    FileClassification, RetentionEnforcer, RetentionPolicy, RetentionReport, WhitelistSet,
};
