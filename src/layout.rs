//! Fixed directory layout and size limits

/// Root of the retention-managed logs
pub const LOG_RETENTION_DIR: &str = "/var/log/japp/edotensei/";
pub const LOG_LINK_LAYER: &str = "/var/log/japp/edotensei/link_layer.log";
pub const LOG_POWER_EVENT: &str = "/var/log/japp/edotensei/power_event.log";
pub const LOG_UNLOCK_SCHEDULE: &str = "/var/log/japp/edotensei/unlock_schedule.log";

/// General application logs
pub const LOG_DEFAULT_DIR: &str = "/var/log/japp/";
pub const LOG_DEFAULT_FILE: &str = "/var/log/japp/app.log";
pub const LOG_ERROR_FILE: &str = "/var/log/japp/error.log";
pub const LOG_WARNING_FILE: &str = "/var/log/japp/warning.log";

/// 1.2 MiB
pub const MAX_LOG_FILE_SIZE: u64 = 1_228_800;

/// Default segment size before the file sink rotates (1 MiB)
pub const DEFAULT_MAX_SEGMENT_BYTES: u64 = 1024 * 1024;

/// Default number of compressed backups the file sink keeps
pub const DEFAULT_MAX_BACKUPS: usize = 1;

pub const PLAIN_LOG_EXTENSION: &str = ".log";
pub const COMPRESSED_EXTENSION: &str = ".gz";
