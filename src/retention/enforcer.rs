//! Directory scan that applies the retention verdicts
//!
//! The enforcer reports every action through the same registry it cleans
//! up after: deletions as warnings, failures as errors. It takes no lock of
//! its own, so callers running it on a schedule must not overlap runs.

use super::classification::{DeletionReason, FileClassification, Verdict};
use super::whitelist::WhitelistSet;
use crate::core::error::{LoggerError, Result};
use crate::core::registry::{ensure_directory, DirectoryState, Registry};
use crate::layout::MAX_LOG_FILE_SIZE;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub whitelist: WhitelistSet,
    /// Largest size, in bytes, a protected file may keep
    pub max_file_size: u64,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            whitelist: WhitelistSet::default_set(),
            max_file_size: MAX_LOG_FILE_SIZE,
        }
    }
}

impl RetentionPolicy {
    pub fn new(whitelist: WhitelistSet) -> Self {
        Self {
            whitelist,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Deletion {
    pub path: PathBuf,
    pub reason: DeletionReason,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionFailure {
    pub path: PathBuf,
    pub message: String,
}

/// What one scan did
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetentionReport {
    pub retained: Vec<PathBuf>,
    pub deleted: Vec<Deletion>,
    pub failures: Vec<RetentionFailure>,
    pub skipped_dirs: usize,
}

impl RetentionReport {
    pub fn was_deleted(&self, path: impl AsRef<Path>) -> bool {
        self.deleted.iter().any(|d| d.path == path.as_ref())
    }

    pub fn was_retained(&self, path: impl AsRef<Path>) -> bool {
        self.retained.iter().any(|p| p == path.as_ref())
    }
}

pub struct RetentionEnforcer<'a> {
    registry: &'a Registry,
    policy: RetentionPolicy,
}

impl<'a> RetentionEnforcer<'a> {
    pub fn new(registry: &'a Registry, policy: RetentionPolicy) -> Self {
        Self { registry, policy }
    }

    pub fn policy(&self) -> &RetentionPolicy {
        &self.policy
    }

    /// Scan `dir` (not recursively) and delete what the policy rejects.
    ///
    /// # Errors
    ///
    /// Fails only when the directory cannot be prepared or listed; problems
    /// with individual files are logged, recorded in the report and skipped.
    pub fn enforce(&self, dir: impl AsRef<Path>) -> Result<RetentionReport> {
        let dir = dir.as_ref();

        match ensure_directory(dir) {
            Ok(DirectoryState::Created) => self.registry.warn(
                self.registry.warning_log(),
                format!("Directory created: {}", dir.display()),
            ),
            Ok(DirectoryState::AlreadyExists) => self.registry.warn(
                self.registry.warning_log(),
                format!("Directory already exists: {}", dir.display()),
            ),
            Err(e) => {
                self.registry.error(
                    self.registry.error_log(),
                    format!("Failed to ensure log directory exists: {}", e),
                );
                return Err(LoggerError::retention_scan(
                    dir.display().to_string(),
                    "cannot prepare directory",
                    e,
                ));
            }
        }

        let entries = fs::read_dir(dir).map_err(|e| {
            self.registry.error(
                self.registry.error_log(),
                format!("Failed to read log directory: {}", e),
            );
            LoggerError::retention_scan(dir.display().to_string(), "cannot list directory", e)
        })?;

        let mut report = RetentionReport::default();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    self.registry.error(
                        self.registry.error_log(),
                        format!("Failed to read entry in {}: {}", dir.display(), e),
                    );
                    report.failures.push(RetentionFailure {
                        path: dir.to_path_buf(),
                        message: e.to_string(),
                    });
                    continue;
                }
            };

            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                report.skipped_dirs += 1;
                continue;
            }

            self.handle_file(dir, &entry, &mut report);
        }

        Ok(report)
    }

    fn handle_file(&self, dir: &Path, entry: &fs::DirEntry, report: &mut RetentionReport) {
        let size = entry.metadata().map(|metadata| metadata.len());
        self.judge(
            dir,
            entry.path(),
            &entry.file_name().to_string_lossy(),
            size,
            report,
        );
    }

    /// Apply the policy to one file given the outcome of stat-ing it. A file
    /// whose size cannot be read is removed.
    fn judge(
        &self,
        dir: &Path,
        path: PathBuf,
        file_name: &str,
        size: io::Result<u64>,
        report: &mut RetentionReport,
    ) {
        let size = match size {
            Ok(size) => size,
            Err(e) => {
                self.registry.error(
                    self.registry.error_log(),
                    format!("Failed to get file info for {} (removing): {}", path.display(), e),
                );
                self.remove_file(path, DeletionReason::MetadataUnavailable, report);
                return;
            }
        };

        let classification = FileClassification::classify(dir, file_name, &self.policy.whitelist);
        match classification.verdict(size, self.policy.max_file_size) {
            Verdict::Retain => report.retained.push(path),
            Verdict::Delete(reason) => self.remove_file(path, reason, report),
        }
    }

    fn remove_file(&self, path: PathBuf, reason: DeletionReason, report: &mut RetentionReport) {
        match fs::remove_file(&path) {
            Ok(()) => {
                self.registry.warn(
                    self.registry.warning_log(),
                    format!("Deleted {}: {}", path.display(), reason),
                );
                report.deleted.push(Deletion { path, reason });
            }
            Err(e) => {
                self.registry.error(
                    self.registry.error_log(),
                    format!("Failed to delete {}: {}", path.display(), e),
                );
                report.failures.push(RetentionFailure {
                    path,
                    message: e.to_string(),
                });
            }
        }
    }
}
