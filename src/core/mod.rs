//! Core logger types and traits

pub mod appender;
pub mod config;
pub mod encoder;
pub mod error;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod registry;
pub mod timestamp;

pub use appender::Appender;
pub use config::LogConfig;
pub use encoder::{ColorConsoleEncoder, EventEncoder, JsonEncoder, MessageEncoder};
pub use error::{LoggerError, Result};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::{HandleStatus, LoggerHandle};
pub use metrics::LoggerMetrics;
pub use registry::{ensure_directory, DirectoryState, Registry};
pub use timestamp::TimestampLayout;
