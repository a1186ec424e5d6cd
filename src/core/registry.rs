//! Registry of per-path logger handles
//!
//! Created once at startup and shared (by reference or `Arc`) with every
//! emitter. Each destination path gets exactly one [`LoggerHandle`], built
//! on first use and kept for the lifetime of the registry.
//!
//! # Example
//!
//! ```no_run
//! use necrolog::{LogConfig, LogLevel, Registry};
//!
//! let registry = Registry::new(LogConfig::load()?);
//! registry.emit("/var/log/japp/app.log", LogLevel::Info, "service started");
//! registry.warn("/var/log/japp/edotensei/power_event.log", "battery low");
//! # Ok::<(), necrolog::LoggerError>(())
//! ```

use super::config::LogConfig;
use super::log_level::LogLevel;
use super::logger::LoggerHandle;
use crate::appenders::ConsoleAppender;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Builds the console sink of each new handle
pub type ConsoleFactory = Box<dyn Fn(&LogConfig) -> ConsoleAppender + Send + Sync>;

/// Outcome of making sure a log directory exists
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryState {
    Created,
    AlreadyExists,
}

/// Create `dir` (and parents) if missing. Safe to call repeatedly and
/// from inside the emission path.
pub fn ensure_directory(dir: &Path) -> io::Result<DirectoryState> {
    match fs::metadata(dir) {
        Ok(metadata) if metadata.is_dir() => Ok(DirectoryState::AlreadyExists),
        Ok(_) => Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{} exists but is not a directory", dir.display()),
        )),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            fs::create_dir_all(dir)?;
            Ok(DirectoryState::Created)
        }
        Err(e) => Err(e),
    }
}

pub struct Registry {
    config: LogConfig,
    handles: RwLock<HashMap<PathBuf, Arc<LoggerHandle>>>,
    console_factory: ConsoleFactory,
}

impl Registry {
    pub fn new(config: LogConfig) -> Self {
        Self::with_console_factory(config, |config| ConsoleAppender::new(config.timezone.clone()))
    }

    /// Registry whose handles get their console sink from `factory`
    pub fn with_console_factory<F>(config: LogConfig, factory: F) -> Self
    where
        F: Fn(&LogConfig) -> ConsoleAppender + Send + Sync + 'static,
    {
        Self {
            config,
            handles: RwLock::new(HashMap::new()),
            console_factory: Box::new(factory),
        }
    }

    /// Handle bound to `path`, built on first request.
    ///
    /// Lookups take the shared lock; only a miss takes the exclusive lock
    /// and checks again before building. The directory status message is
    /// logged after the lock is released, by the caller that built the
    /// handle.
    pub fn get_or_create(&self, path: impl AsRef<Path>) -> Arc<LoggerHandle> {
        let path = path.as_ref();

        if let Some(handle) = self.handles.read().get(path) {
            return Arc::clone(handle);
        }

        let (handle, dir_state) = {
            let mut handles = self.handles.write();
            if let Some(handle) = handles.get(path) {
                return Arc::clone(handle);
            }

            let dir_state = path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty())
                .map(|parent| (parent.to_path_buf(), ensure_directory(parent)));

            let console = (self.console_factory)(&self.config);
            let handle = Arc::new(LoggerHandle::open(path, &self.config, console));
            handles.insert(path.to_path_buf(), Arc::clone(&handle));
            (handle, dir_state)
        };

        match dir_state {
            Some((dir, Ok(DirectoryState::Created))) => {
                self.warn(&self.config.warning_log, format!("Directory created: {}", dir.display()));
            }
            Some((dir, Ok(DirectoryState::AlreadyExists))) => {
                self.warn(
                    &self.config.warning_log,
                    format!("Directory already exists: {}", dir.display()),
                );
            }
            Some((dir, Err(e))) => {
                self.error(
                    &self.config.error_log,
                    format!("Error checking directory {}: {}", dir.display(), e),
                );
            }
            None => {}
        }

        handle
    }

    /// Record `message` at `level` in the log at `path`
    pub fn emit(&self, path: impl AsRef<Path>, level: LogLevel, message: impl Into<String>) {
        self.get_or_create(path).emit(level, message);
    }

    pub fn debug(&self, path: impl AsRef<Path>, message: impl Into<String>) {
        self.emit(path, LogLevel::Debug, message);
    }

    pub fn info(&self, path: impl AsRef<Path>, message: impl Into<String>) {
        self.emit(path, LogLevel::Info, message);
    }

    pub fn warn(&self, path: impl AsRef<Path>, message: impl Into<String>) {
        self.emit(path, LogLevel::Warn, message);
    }

    pub fn error(&self, path: impl AsRef<Path>, message: impl Into<String>) {
        self.emit(path, LogLevel::Error, message);
    }

    /// Where the facility reports its own warnings
    pub fn warning_log(&self) -> &Path {
        &self.config.warning_log
    }

    /// Where the facility reports its own failures
    pub fn error_log(&self) -> &Path {
        &self.config.error_log
    }

    pub fn config(&self) -> &LogConfig {
        &self.config
    }

    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        self.handles.read().contains_key(path.as_ref())
    }

    pub fn len(&self) -> usize {
        self.handles.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.read().is_empty()
    }

    /// Paths of all handles built so far
    pub fn paths(&self) -> Vec<PathBuf> {
        self.handles.read().keys().cloned().collect()
    }
}
