//! Timestamp formatting utilities
//!
//! Every timestamp the facility renders uses one fixed pattern with
//! millisecond precision. The file sink additionally appends the configured
//! timezone label after a single space.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// strftime pattern shared by both sinks: `2025-01-08 10:30:45.123`
pub const TIMESTAMP_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Renders timestamps as `<pattern> <label>`.
///
/// # Examples
///
/// ```
/// use necrolog::core::TimestampLayout;
/// use chrono::{Local, TimeZone};
///
/// let layout = TimestampLayout::new("KST");
/// let at = Local.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap();
/// assert_eq!(layout.format(&at), "2024-01-01 09:30:00.000 KST");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimestampLayout {
    label: String,
}

impl TimestampLayout {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    /// Timezone label appended verbatim
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Format with the label suffix. An empty label still leaves the
    /// separating space in place.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        format!("{} {}", format_bare(datetime), self.label)
    }
}

/// Format without any label
#[must_use]
pub fn format_bare(datetime: &DateTime<Local>) -> String {
    datetime.format(TIMESTAMP_PATTERN).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn fixed() -> DateTime<Local> {
        Local
            .with_ymd_and_hms(2024, 3, 15, 23, 59, 58)
            .single()
            .expect("unambiguous local time")
            + chrono::Duration::milliseconds(7)
    }

    #[test]
    fn test_millisecond_precision() {
        assert_eq!(format_bare(&fixed()), "2024-03-15 23:59:58.007");
    }

    #[test]
    fn test_label_is_appended_verbatim() {
        let layout = TimestampLayout::new("Asia/Seoul");
        assert_eq!(layout.format(&fixed()), "2024-03-15 23:59:58.007 Asia/Seoul");
    }

    #[test]
    fn test_empty_label_keeps_separator() {
        let layout = TimestampLayout::default();
        assert_eq!(layout.format(&fixed()), "2024-03-15 23:59:58.007 ");
    }
}
