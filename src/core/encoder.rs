//! Event encoders
//!
//! Each sink owns one encoder turning a [`LogEntry`] into a single line
//! (without the trailing newline):
//! - [`JsonEncoder`]: `{"time":"…","level":"INFO","msg":"…"}` for the file sink
//! - [`MessageEncoder`]: the bare message, base of the console pipeline
//! - [`ColorConsoleEncoder`]: decorator that rewrites the message into
//!   `<colored LEVEL> [<timestamp>] <label> <message>` and delegates

use super::error::{LoggerError, Result};
use super::log_entry::LogEntry;
use super::log_level::LogLevel;
use super::timestamp::{format_bare, TimestampLayout};
use chrono::Local;
use colored::Colorize;
use serde::Serialize;

pub trait EventEncoder: Send + Sync {
    fn encode(&self, entry: &LogEntry) -> Result<String>;
}

impl<E: EventEncoder + ?Sized> EventEncoder for Box<E> {
    fn encode(&self, entry: &LogEntry) -> Result<String> {
        (**self).encode(entry)
    }
}

#[derive(Serialize)]
struct JsonRecord<'a> {
    time: String,
    level: &'a str,
    msg: &'a str,
}

/// Structured encoder for the file sink
#[derive(Debug, Clone, Default)]
pub struct JsonEncoder {
    layout: TimestampLayout,
}

impl JsonEncoder {
    #[must_use]
    pub fn new(layout: TimestampLayout) -> Self {
        Self { layout }
    }
}

impl EventEncoder for JsonEncoder {
    fn encode(&self, entry: &LogEntry) -> Result<String> {
        let record = JsonRecord {
            time: self.layout.format(&entry.timestamp),
            level: entry.level.to_str(),
            msg: &entry.message,
        };
        serde_json::to_string(&record).map_err(|e| LoggerError::formatter("JSON", e.to_string()))
    }
}

/// Base console encoder: emits the message field only
#[derive(Debug, Clone, Copy, Default)]
pub struct MessageEncoder;

impl EventEncoder for MessageEncoder {
    fn encode(&self, entry: &LogEntry) -> Result<String> {
        Ok(entry.message.clone())
    }
}

/// Wrap a level name in its ANSI color. Names outside the four known levels
/// are returned unchanged.
pub fn colorize_level(name: &str) -> String {
    match name.parse::<LogLevel>() {
        Ok(level) if level.to_str() == name => name.color(level.color_code()).to_string(),
        _ => name.to_string(),
    }
}

/// Colorizing decorator over another encoder.
///
/// The timestamp is read from the clock at encode time rather than taken
/// from the entry, so the console line may drift from the file record of
/// the same event by a few microseconds.
#[derive(Debug, Clone, Default)]
pub struct ColorConsoleEncoder<E = MessageEncoder> {
    inner: E,
    label: String,
}

impl ColorConsoleEncoder<MessageEncoder> {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self::wrap(MessageEncoder, label)
    }
}

impl<E: EventEncoder> ColorConsoleEncoder<E> {
    #[must_use]
    pub fn wrap(inner: E, label: impl Into<String>) -> Self {
        Self {
            inner,
            label: label.into(),
        }
    }

    pub fn inner(&self) -> &E {
        &self.inner
    }

    fn decorate(&self, entry: &LogEntry) -> String {
        format!(
            "{} [{}] {} {}",
            colorize_level(entry.level.to_str()),
            format_bare(&Local::now()),
            self.label,
            entry.message
        )
    }
}

impl<E: EventEncoder> EventEncoder for ColorConsoleEncoder<E> {
    fn encode(&self, entry: &LogEntry) -> Result<String> {
        let decorated = entry.clone().with_message(self.decorate(entry));
        self.inner.encode(&decorated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_has_exactly_three_fields() {
        let encoder = JsonEncoder::new(TimestampLayout::new("UTC"));
        let entry = LogEntry::new(LogLevel::Warn, "disk \"almost\" full\nsecond line");

        let line = encoder.encode(&entry).unwrap();
        assert!(!line.contains('\n'));

        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        let object = parsed.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(parsed["level"], "WARN");
        assert_eq!(parsed["msg"], "disk \"almost\" full\nsecond line");
        assert!(parsed["time"].as_str().unwrap().ends_with(" UTC"));
    }

    #[test]
    fn test_json_field_order() {
        let encoder = JsonEncoder::default();
        let line = encoder.encode(&LogEntry::new(LogLevel::Info, "x")).unwrap();

        let time = line.find("\"time\"").unwrap();
        let level = line.find("\"level\"").unwrap();
        let msg = line.find("\"msg\"").unwrap();
        assert!(time < level && level < msg);
    }

    #[test]
    fn test_colorize_known_and_unknown_levels() {
        colored::control::set_override(true);
        assert_eq!(colorize_level("DEBUG"), "\u{1b}[32mDEBUG\u{1b}[0m");
        assert_eq!(colorize_level("INFO"), "\u{1b}[34mINFO\u{1b}[0m");
        assert_eq!(colorize_level("WARN"), "\u{1b}[33mWARN\u{1b}[0m");
        assert_eq!(colorize_level("ERROR"), "\u{1b}[31mERROR\u{1b}[0m");
        assert_eq!(colorize_level("NOTICE"), "NOTICE");
        assert_eq!(colorize_level("WARNING"), "WARNING");
        assert_eq!(colorize_level("warn"), "warn");
    }

    #[test]
    fn test_console_line_shape() {
        colored::control::set_override(true);
        let encoder = ColorConsoleEncoder::new("KST");
        let line = encoder
            .encode(&LogEntry::new(LogLevel::Error, "boom"))
            .unwrap();

        let prefix = "\u{1b}[31mERROR\u{1b}[0m [";
        assert!(line.starts_with(prefix));
        assert!(line.ends_with("] KST boom"));
        // 23-char timestamp between the brackets
        assert_eq!(&line[prefix.len() + 23..prefix.len() + 24], "]");
    }

    struct Angled;

    impl EventEncoder for Angled {
        fn encode(&self, entry: &LogEntry) -> Result<String> {
            Ok(format!("<{}>", entry.message))
        }
    }

    #[test]
    fn test_decorator_delegates_to_inner() {
        colored::control::set_override(true);
        let encoder = ColorConsoleEncoder::wrap(Angled, "tz");
        let line = encoder
            .encode(&LogEntry::new(LogLevel::Info, "hello"))
            .unwrap();
        assert!(line.starts_with("<\u{1b}[34mINFO\u{1b}[0m ["));
        assert!(line.ends_with("] tz hello>"));
    }
}
