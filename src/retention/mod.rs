//! Whitelist-based retention for a log directory
//!
//! A short list of protected logs is kept unless it grows past the size
//! cap; everything else in the directory, including rotated backups of
//! unprotected logs, is removed on every run.

pub mod classification;
pub mod enforcer;
pub mod whitelist;

pub use classification::{original_log_path, DeletionReason, FileClassification, Verdict};
pub use enforcer::{
    Deletion, RetentionEnforcer, RetentionFailure, RetentionPolicy, RetentionReport,
};
pub use whitelist::WhitelistSet;
