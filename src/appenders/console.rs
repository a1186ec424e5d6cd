//! Console appender implementation

use crate::core::encoder::{ColorConsoleEncoder, EventEncoder};
use crate::core::{Appender, LogEntry, Result};
use std::io::Write;

/// Output stream other than stdout, used to capture console lines
pub type ConsoleWriter = Box<dyn Write + Send + Sync>;

/// Writes one colorized line per event to stdout
pub struct ConsoleAppender {
    encoder: Box<dyn EventEncoder>,
    writer: Option<ConsoleWriter>,
}

impl ConsoleAppender {
    /// Console sink labelling its timestamps with `timezone`
    pub fn new(timezone: impl Into<String>) -> Self {
        Self {
            encoder: Box::new(ColorConsoleEncoder::new(timezone)),
            writer: None,
        }
    }

    /// Send lines to `writer` instead of stdout
    #[must_use]
    pub fn with_writer<W: Write + Send + Sync + 'static>(mut self, writer: W) -> Self {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Use a different encoder for console lines
    ///
    /// # Example
    ///
    /// ```
    /// use necrolog::appenders::ConsoleAppender;
    /// use necrolog::core::encoder::JsonEncoder;
    ///
    /// let appender = ConsoleAppender::default().with_encoder(JsonEncoder::default());
    /// ```
    #[must_use]
    pub fn with_encoder<E: EventEncoder + 'static>(mut self, encoder: E) -> Self {
        self.encoder = Box::new(encoder);
        self
    }

    /// Render the line this appender would print for `entry`
    pub fn render(&self, entry: &LogEntry) -> Result<String> {
        self.encoder.encode(entry)
    }
}

impl Default for ConsoleAppender {
    fn default() -> Self {
        Self::new("")
    }
}

impl Appender for ConsoleAppender {
    fn append(&mut self, entry: &LogEntry) -> Result<()> {
        let mut line = self.render(entry)?;
        line.push('\n');

        match self.writer {
            Some(ref mut writer) => writer.write_all(line.as_bytes())?,
            None => {
                // One write under the stdout lock keeps lines whole across handles
                let stdout = std::io::stdout();
                let mut out = stdout.lock();
                out.write_all(line.as_bytes())?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        match self.writer {
            Some(ref mut writer) => writer.flush()?,
            None => std::io::stdout().flush()?,
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LogLevel;

    #[test]
    fn test_render_includes_label_and_message() {
        colored::control::set_override(true);
        let appender = ConsoleAppender::new("UTC");
        let line = appender
            .render(&LogEntry::new(LogLevel::Warn, "low battery"))
            .unwrap();

        assert!(line.starts_with("\u{1b}[33mWARN\u{1b}[0m ["));
        assert!(line.ends_with("] UTC low battery"));
    }

    #[derive(Clone, Default)]
    struct Captured(std::sync::Arc<parking_lot::Mutex<Vec<u8>>>);

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_with_writer_captures_lines() {
        let captured = Captured::default();
        let mut appender = ConsoleAppender::new("UTC").with_writer(captured.clone());

        appender.append(&LogEntry::new(LogLevel::Info, "one")).unwrap();
        appender.append(&LogEntry::new(LogLevel::Error, "two")).unwrap();
        appender.flush().unwrap();

        let text = String::from_utf8(captured.0.lock().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("UTC one"));
        assert!(lines[1].ends_with("UTC two"));
    }

    #[test]
    fn test_append_and_flush() {
        let mut appender = ConsoleAppender::default();
        appender
            .append(&LogEntry::new(LogLevel::Info, "console smoke test"))
            .unwrap();
        appender.flush().unwrap();
        assert_eq!(appender.name(), "console");
    }
}
