//! Facility configuration
//!
//! Loaded once per process from, in increasing precedence: built-in
//! defaults, an optional `necrolog.toml` in the working directory, and
//! `NECROLOG_*` environment variables (`NECROLOG_LEVEL`,
//! `NECROLOG_TIMEZONE`, `NECROLOG_MAX_SEGMENT_BYTES`, ...).

use super::error::Result;
use super::log_level::LogLevel;
use crate::appenders::RotationPolicy;
use crate::layout::{
    DEFAULT_MAX_BACKUPS, DEFAULT_MAX_SEGMENT_BYTES, LOG_ERROR_FILE, LOG_WARNING_FILE,
};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "necrolog.toml";
pub const ENV_PREFIX: &str = "NECROLOG_";

/// Keys taken from the environment as raw text, never reinterpreted
const VERBATIM_KEYS: [&str; 2] = ["level", "timezone"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Minimum severity selector; unrecognized values mean `debug`
    #[serde(deserialize_with = "scalar_string")]
    pub level: String,
    /// Label appended verbatim to formatted timestamps
    #[serde(deserialize_with = "scalar_string")]
    pub timezone: String,
    pub max_segment_bytes: u64,
    pub max_backups: usize,
    pub compress: bool,
    /// Where the facility reports its own warnings
    pub warning_log: PathBuf,
    /// Where the facility reports its own failures
    pub error_log: PathBuf,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            timezone: String::new(),
            max_segment_bytes: DEFAULT_MAX_SEGMENT_BYTES,
            max_backups: DEFAULT_MAX_BACKUPS,
            compress: true,
            warning_log: PathBuf::from(LOG_WARNING_FILE),
            error_log: PathBuf::from(LOG_ERROR_FILE),
        }
    }
}

impl LogConfig {
    pub fn load() -> Result<Self> {
        Ok(Self::figment().extract::<Self>()?)
    }

    /// Layered provider chain. `NECROLOG_LEVEL` and `NECROLOG_TIMEZONE` are
    /// merged as the exact strings found in the environment, so `+0900`
    /// stays `+0900`.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(LogConfig::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Env::prefixed(ENV_PREFIX).ignore(&VERBATIM_KEYS));

        for key in VERBATIM_KEYS {
            let var = format!("{}{}", ENV_PREFIX, key.to_uppercase());
            if let Ok(raw) = std::env::var(&var) {
                figment = figment.merge(Serialized::default(key, raw));
            }
        }
        figment
    }

    /// Resolved threshold
    #[must_use]
    pub fn min_level(&self) -> LogLevel {
        LogLevel::lenient(&self.level)
    }

    #[must_use]
    pub fn rotation_policy(&self) -> RotationPolicy {
        RotationPolicy::new()
            .with_max_size(self.max_segment_bytes)
            .with_max_backups(self.max_backups)
            .with_compression(self.compress)
    }

    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    #[must_use]
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    #[must_use]
    pub fn with_max_segment_bytes(mut self, bytes: u64) -> Self {
        self.max_segment_bytes = bytes;
        self
    }

    #[must_use]
    pub fn with_max_backups(mut self, count: usize) -> Self {
        self.max_backups = count;
        self
    }

    #[must_use]
    pub fn with_compression(mut self, enabled: bool) -> Self {
        self.compress = enabled;
        self
    }

    /// Route the facility's own warning and error logs into `dir`
    #[must_use]
    pub fn with_status_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.warning_log = dir.as_ref().join("warning.log");
        self.error_log = dir.as_ref().join("error.log");
        self
    }
}

/// Accept any scalar for a text setting; a label like `9` in TOML is still
/// a label.
fn scalar_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string, number or boolean")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<String, E> {
            Ok(v)
        }

        fn visit_char<E: de::Error>(self, v: char) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}
