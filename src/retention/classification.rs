//! Per-file retention verdicts

use super::whitelist::WhitelistSet;
use crate::layout::{COMPRESSED_EXTENSION, PLAIN_LOG_EXTENSION};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileClassification {
    /// The file's own path is whitelisted (whatever its extension)
    WhitelistedPlain,
    /// Compressed file whose `<prefix>.log` is whitelisted
    WhitelistedCompressed,
    /// Compressed file whose `<prefix>.log` is not whitelisted
    UnlistedCompressed,
    /// Anything else
    UnlistedPlain,
}

/// Why a file was, or should be, removed
#[derive(Debug, Clone, PartialEq)]
pub enum DeletionReason {
    MetadataUnavailable,
    OversizedWhitelisted { size: u64 },
    OversizedCompressed { size: u64 },
    NonWhitelistedPrefix,
    NonWhitelisted,
}

impl fmt::Display for DeletionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeletionReason::MetadataUnavailable => write!(f, "Failed to get file info"),
            DeletionReason::OversizedWhitelisted { size } => {
                write!(f, "Oversized whitelist file ({:.2} MB)", mebibytes(*size))
            }
            DeletionReason::OversizedCompressed { size } => {
                write!(f, "Oversized compressed file ({:.2} MB)", mebibytes(*size))
            }
            DeletionReason::NonWhitelistedPrefix => {
                write!(f, "Compressed file with non-whitelisted prefix")
            }
            DeletionReason::NonWhitelisted => write!(f, "Non-whitelist file"),
        }
    }
}

fn mebibytes(size: u64) -> f64 {
    size as f64 / (1024.0 * 1024.0)
}

#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Retain,
    Delete(DeletionReason),
}

/// Plain log a compressed file belongs to: the part of its name before the
/// first hyphen, plus `.log`, in the same directory.
///
/// ```
/// use necrolog::retention::original_log_path;
/// use std::path::Path;
///
/// let original = original_log_path(Path::new("/logs"), "link_layer-2024-01-01T00-00-00.000.log.gz");
/// assert_eq!(original, Path::new("/logs/link_layer.log"));
/// ```
pub fn original_log_path(dir: &Path, file_name: &str) -> PathBuf {
    let prefix = file_name.split('-').next().unwrap_or(file_name);
    dir.join(format!("{}{}", prefix, PLAIN_LOG_EXTENSION))
}

impl FileClassification {
    pub fn classify(dir: &Path, file_name: &str, whitelist: &WhitelistSet) -> Self {
        if whitelist.contains(dir.join(file_name)) {
            return FileClassification::WhitelistedPlain;
        }

        if file_name.ends_with(COMPRESSED_EXTENSION) {
            if whitelist.contains(original_log_path(dir, file_name)) {
                FileClassification::WhitelistedCompressed
            } else {
                FileClassification::UnlistedCompressed
            }
        } else {
            FileClassification::UnlistedPlain
        }
    }

    /// Whitelisting only protects files up to and including `cap` bytes
    pub fn verdict(self, size: u64, cap: u64) -> Verdict {
        match self {
            FileClassification::WhitelistedPlain if size > cap => {
                Verdict::Delete(DeletionReason::OversizedWhitelisted { size })
            }
            FileClassification::WhitelistedCompressed if size > cap => {
                Verdict::Delete(DeletionReason::OversizedCompressed { size })
            }
            FileClassification::WhitelistedPlain | FileClassification::WhitelistedCompressed => {
                Verdict::Retain
            }
            FileClassification::UnlistedCompressed => {
                Verdict::Delete(DeletionReason::NonWhitelistedPrefix)
            }
            FileClassification::UnlistedPlain => Verdict::Delete(DeletionReason::NonWhitelisted),
        }
    }
}
