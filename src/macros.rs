//! Logging macros for ergonomic log message formatting.
//!
//! Each macro takes the registry, the destination path and `format!`-style
//! arguments.
//!
//! # Examples
//!
//! ```no_run
//! use necrolog::prelude::*;
//! use necrolog::{info, warn};
//!
//! let registry = Registry::new(LogConfig::default());
//! let path = "/var/log/japp/app.log";
//!
//! info!(registry, path, "Server started");
//!
//! let port = 8080;
//! warn!(registry, path, "Port {} already bound, retrying", port);
//! ```

/// Log a formatted message at an explicit level.
///
/// ```no_run
/// # use necrolog::prelude::*;
/// # let registry = Registry::new(LogConfig::default());
/// use necrolog::log;
/// log!(registry, "/var/log/japp/app.log", LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($registry:expr, $path:expr, $level:expr, $($arg:tt)+) => {
        $registry.emit($path, $level, format!($($arg)+))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($registry:expr, $path:expr, $($arg:tt)+) => {
        $crate::log!($registry, $path, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($registry:expr, $path:expr, $($arg:tt)+) => {
        $crate::log!($registry, $path, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($registry:expr, $path:expr, $($arg:tt)+) => {
        $crate::log!($registry, $path, $crate::LogLevel::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($registry:expr, $path:expr, $($arg:tt)+) => {
        $crate::log!($registry, $path, $crate::LogLevel::Error, $($arg)+)
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{LogConfig, Registry};
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_macros_format_and_route() {
        let dir = tempdir().unwrap();
        let registry = Registry::new(LogConfig::default().with_status_dir(dir.path()));
        let path = dir.path().join("macros.log");

        crate::debug!(registry, &path, "debug {}", 1);
        crate::info!(registry, &path, "info {}", 2);
        crate::warn!(registry, &path, "warn {}", 3);
        crate::error!(registry, &path, "error {}", 4);

        let content = fs::read_to_string(&path).unwrap();
        let messages: Vec<String> = content
            .lines()
            .map(|line| {
                let record: serde_json::Value = serde_json::from_str(line).unwrap();
                record["msg"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(messages, vec!["debug 1", "info 2", "warn 3", "error 4"]);
    }
}
