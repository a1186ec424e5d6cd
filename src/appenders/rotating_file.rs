//! Rotating file appender with size-based rollover
//!
//! The active segment lives at the configured path. Once it has reached the
//! size limit, the next write first moves it aside to
//! `<stem>-<UTC timestamp><ext>`, gzips it when compression is enabled, and
//! removes the oldest backups beyond the configured count. Backups keep the
//! original stem before the first hyphen, which is what the retention
//! enforcer uses to tie them back to their log.

use crate::core::appender::Appender;
use crate::core::encoder::{EventEncoder, JsonEncoder};
use crate::core::error::{LoggerError, Result};
use crate::core::log_entry::LogEntry;
use crate::layout::{COMPRESSED_EXTENSION, DEFAULT_MAX_BACKUPS, DEFAULT_MAX_SEGMENT_BYTES};
use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Timestamp embedded in backup names; sorts chronologically as text
const BACKUP_TIME_FORMAT: &str = "%Y-%m-%dT%H-%M-%S%.3f";

/// Configuration for rotating file appender
///
/// # Examples
///
/// ```
/// use necrolog::appenders::RotationPolicy;
///
/// // Aggressive rotation: 1 MiB segments, one compressed backup
/// let policy = RotationPolicy::new()
///     .with_max_size(1024 * 1024)
///     .with_max_backups(1)
///     .with_compression(true);
/// assert_eq!(policy.max_file_size(), 1024 * 1024);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RotationPolicy {
    /// Segment size that triggers rollover
    pub max_bytes: u64,
    /// Maximum number of rotated files to keep; 0 keeps all of them
    pub max_backup_files: usize,
    /// Whether to compress rotated files
    pub compress: bool,
}

impl Default for RotationPolicy {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_SEGMENT_BYTES,
            max_backup_files: DEFAULT_MAX_BACKUPS,
            compress: true,
        }
    }
}

impl RotationPolicy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_size(mut self, size: u64) -> Self {
        self.max_bytes = size;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backup_files = count;
        self
    }

    #[must_use = "builder methods return a new value and do not modify the original"]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    #[must_use]
    pub fn max_file_size(&self) -> u64 {
        self.max_bytes
    }
}

/// Size-rotating, optionally compressing file sink
///
/// # Examples
///
/// ```no_run
/// use necrolog::appenders::{RotatingFileAppender, RotationPolicy};
///
/// let policy = RotationPolicy::new().with_max_size(64 * 1024).with_max_backups(3);
/// let appender = RotatingFileAppender::with_policy("/var/log/japp/app.log", policy).unwrap();
/// ```
pub struct RotatingFileAppender {
    base_path: PathBuf,
    policy: RotationPolicy,
    writer: Option<BufWriter<File>>,
    current_size: u64,
    encoder: Box<dyn EventEncoder>,
    rotation_count: u64,
}

impl RotatingFileAppender {
    /// Create a new rotating file appender with the default policy
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or opened
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_policy(path, RotationPolicy::default())
    }

    /// Create a new rotating file appender with custom policy
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or opened
    pub fn with_policy<P: AsRef<Path>>(path: P, policy: RotationPolicy) -> Result<Self> {
        let base_path = path.as_ref().to_path_buf();

        if let Some(parent) = base_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                LoggerError::io_operation(
                    "create log directory",
                    format!("Failed to create directory '{}'", parent.display()),
                    e,
                )
            })?;
        }

        let (file, current_size) = Self::open_segment(&base_path)?;

        Ok(Self {
            base_path,
            policy,
            writer: Some(BufWriter::new(file)),
            current_size,
            encoder: Box::new(JsonEncoder::default()),
            rotation_count: 0,
        })
    }

    /// Replace the record encoder (JSON lines by default)
    #[must_use]
    pub fn with_encoder<E: EventEncoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    fn open_segment(path: &Path) -> Result<(File, u64)> {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Failed to open: {}", e),
                )
            })?;

        let size = file
            .metadata()
            .map_err(|e| {
                LoggerError::file_appender(
                    path.display().to_string(),
                    format!("Cannot access file metadata: {}", e),
                )
            })?
            .len();

        Ok((file, size))
    }

    fn should_rotate(&self) -> bool {
        self.current_size > 0 && self.current_size >= self.policy.max_bytes
    }

    /// Perform log rotation
    fn rotate(&mut self) -> Result<()> {
        // Explicitly drop writer to release file handle before the rename
        if let Some(mut writer) = self.writer.take() {
            writer.flush().map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to flush before rotation: {}", e),
                )
            })?;
        }

        if self.base_path.exists() {
            let backup_path = self.next_backup_path(Utc::now());
            fs::rename(&self.base_path, &backup_path).map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to rotate current log file: {}", e),
                )
            })?;

            if self.policy.compress {
                compress_file(&backup_path)?;
            }
        }

        self.prune_backups();

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.base_path)
            .map_err(|e| {
                LoggerError::file_rotation(
                    self.base_path.display().to_string(),
                    format!("Failed to create new log file: {}", e),
                )
            })?;

        self.writer = Some(BufWriter::new(file));
        self.current_size = 0;
        self.rotation_count += 1;

        Ok(())
    }

    fn stem_and_extension(&self) -> (String, String) {
        let stem = self
            .base_path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("app")
            .to_string();
        let ext = self
            .base_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e))
            .unwrap_or_default();
        (stem, ext)
    }

    /// Backup path for a rollover at `at`. Collisions within the same
    /// millisecond move the stamp forward so names stay unique and ordered.
    fn next_backup_path(&self, mut at: DateTime<Utc>) -> PathBuf {
        let (stem, ext) = self.stem_and_extension();
        loop {
            let name = format!("{}-{}{}", stem, at.format(BACKUP_TIME_FORMAT), ext);
            let candidate = self.base_path.with_file_name(name);
            if !candidate.exists() && !with_suffix(&candidate, COMPRESSED_EXTENSION).exists() {
                return candidate;
            }
            at += Duration::milliseconds(1);
        }
    }

    /// Rotated segments of this log, oldest first.
    ///
    /// Only names of the form `<stem>-<backup timestamp><ext>[.gz]` count;
    /// other files sharing the stem (such as `app-errors.log`) are left alone.
    ///
    /// # Errors
    ///
    /// Returns error if the log directory cannot be listed
    pub fn backups(&self) -> Result<Vec<PathBuf>> {
        let (stem, ext) = self.stem_and_extension();
        let dir = match self.base_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut backups: Vec<(NaiveDateTime, PathBuf)> = fs::read_dir(&dir)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .filter_map(|entry| {
                let stamp = entry
                    .file_name()
                    .to_str()
                    .and_then(|name| backup_timestamp(name, &stem, &ext))?;
                Some((stamp, entry.path()))
            })
            .collect();

        backups.sort();
        Ok(backups.into_iter().map(|(_, path)| path).collect())
    }

    fn prune_backups(&self) {
        if self.policy.max_backup_files == 0 {
            return;
        }

        let backups = match self.backups() {
            Ok(backups) => backups,
            Err(e) => {
                eprintln!(
                    "[WARN] Failed to list backups of {}: {}",
                    self.base_path.display(),
                    e
                );
                return;
            }
        };

        let excess = backups.len().saturating_sub(self.policy.max_backup_files);
        for old in backups.iter().take(excess) {
            if let Err(e) = fs::remove_file(old) {
                eprintln!("[WARN] Failed to remove old backup {}: {}", old.display(), e);
            }
        }
    }

    #[must_use]
    pub fn current_size(&self) -> u64 {
        self.current_size
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.base_path
    }

    #[must_use]
    pub fn policy(&self) -> &RotationPolicy {
        &self.policy
    }

    /// Number of rollovers performed by this appender
    #[must_use]
    pub fn rotation_count(&self) -> u64 {
        self.rotation_count
    }
}

impl Appender for RotatingFileAppender {
    fn name(&self) -> &str {
        "RotatingFileAppender"
    }

    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        if self.should_rotate() {
            if let Err(e) = self.rotate() {
                eprintln!(
                    "[WARN] Log rotation failed: {}. Continuing with current file.",
                    e
                );

                if self.writer.is_none() {
                    match Self::open_segment(&self.base_path) {
                        Ok((file, _)) => self.writer = Some(BufWriter::new(file)),
                        Err(reopen_err) => {
                            eprintln!(
                                "[ERROR] Failed to reopen log file after rotation failure: {}",
                                reopen_err
                            );
                            return Err(e);
                        }
                    }
                }

                // Allow the segment to outgrow the limit rather than retrying on every write
                self.current_size = 0;
            }
        }

        let mut line = self.encoder.encode(entry)?;
        line.push('\n');

        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::file_appender(self.base_path.display().to_string(), "Writer not initialized"))?;

        writer.write_all(line.as_bytes()).map_err(|e| {
            LoggerError::file_appender(
                self.base_path.display().to_string(),
                format!("Failed to write log entry: {}", e),
            )
        })?;
        self.current_size += line.len() as u64;
        Ok(())
    }

    /// Flush buffered bytes and sync them to disk
    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to flush: {}", e),
                )
            })?;
            writer.get_ref().sync_data().map_err(|e| {
                LoggerError::file_appender(
                    self.base_path.display().to_string(),
                    format!("Failed to sync: {}", e),
                )
            })?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileAppender {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

/// Rollover time encoded in `name` if it is a backup of `<stem><ext>`
fn backup_timestamp(name: &str, stem: &str, ext: &str) -> Option<NaiveDateTime> {
    let rest = name.strip_prefix(stem)?.strip_prefix('-')?;
    let rest = rest.strip_suffix(COMPRESSED_EXTENSION).unwrap_or(rest);
    let stamp = rest.strip_suffix(ext)?;
    NaiveDateTime::parse_from_str(stamp, BACKUP_TIME_FORMAT).ok()
}

fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name: OsString = path.as_os_str().to_owned();
    name.push(suffix);
    PathBuf::from(name)
}

/// Gzip `path` into `<path>.gz` through a temporary file, removing the
/// original only once the compressed copy is in place.
fn compress_file(path: &Path) -> Result<()> {
    use std::io::{BufReader, Read};

    let gz_path = with_suffix(path, COMPRESSED_EXTENSION);
    let temp_gz_path = with_suffix(&gz_path, ".tmp");

    let input = File::open(path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to open file for compression: {}", path.display()),
            e,
        )
    })?;
    let mut reader = BufReader::with_capacity(64 * 1024, input);

    let output = File::create(&temp_gz_path).map_err(|e| {
        LoggerError::io_operation(
            "compress log file",
            format!(
                "Failed to create temporary compressed file: {}",
                temp_gz_path.display()
            ),
            e,
        )
    })?;
    let mut encoder = flate2::write::GzEncoder::new(
        BufWriter::with_capacity(64 * 1024, output),
        flate2::Compression::default(),
    );

    let mut buffer = vec![0u8; 64 * 1024];
    loop {
        let bytes_read = reader.read(&mut buffer).map_err(|e| {
            let _ = fs::remove_file(&temp_gz_path);
            LoggerError::io_operation(
                "compress log file",
                format!("Failed to read from file: {}", path.display()),
                e,
            )
        })?;

        if bytes_read == 0 {
            break;
        }

        encoder.write_all(&buffer[..bytes_read]).map_err(|e| {
            let _ = fs::remove_file(&temp_gz_path);
            LoggerError::io_operation("compress log file", "Failed to compress data chunk", e)
        })?;
    }

    encoder
        .finish()
        .and_then(|mut out| out.flush())
        .map_err(|e| {
            let _ = fs::remove_file(&temp_gz_path);
            LoggerError::io_operation("compress log file", "Failed to finish compression", e)
        })?;

    fs::rename(&temp_gz_path, &gz_path).map_err(|e| {
        let _ = fs::remove_file(&temp_gz_path);
        LoggerError::io_operation(
            "compress log file",
            format!("Failed to rename compressed file to: {}", gz_path.display()),
            e,
        )
    })?;

    if let Err(e) = fs::remove_file(path) {
        eprintln!(
            "[WARN] Compression succeeded but failed to remove original file {}: {}. \
            Both compressed and uncompressed versions exist.",
            path.display(),
            e
        );
    }

    Ok(())
}
