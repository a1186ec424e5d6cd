//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
pub enum LogLevel {
    #[default]
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }

    /// Parse a configured or requested level, falling back to `Debug` for
    /// anything unrecognized.
    ///
    /// ```
    /// use necrolog::LogLevel;
    ///
    /// assert_eq!(LogLevel::lenient("WARN"), LogLevel::Warn);
    /// assert_eq!(LogLevel::lenient("verbose"), LogLevel::Debug);
    /// assert_eq!(LogLevel::lenient(""), LogLevel::Debug);
    /// ```
    #[must_use]
    pub fn lenient(s: &str) -> Self {
        s.trim().parse().unwrap_or(LogLevel::Debug)
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            LogLevel::Debug => Green,
            LogLevel::Info => Blue,
            LogLevel::Warn => Yellow,
            LogLevel::Error => Red,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            _ => Err(format!("Invalid log level: '{}'", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_is_total() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warn);
        assert!(LogLevel::Warn < LogLevel::Error);
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("error".parse::<LogLevel>(), Ok(LogLevel::Error));
        assert_eq!("Info".parse::<LogLevel>(), Ok(LogLevel::Info));
        assert_eq!("warning".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert!("fatal".parse::<LogLevel>().is_err());
    }

    #[test]
    fn test_lenient_falls_back_to_debug() {
        assert_eq!(LogLevel::lenient(" info "), LogLevel::Info);
        assert_eq!(LogLevel::lenient("trace"), LogLevel::Debug);
        assert_eq!(LogLevel::lenient(""), LogLevel::Debug);
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(LogLevel::Debug.color_code(), colored::Color::Green);
        assert_eq!(LogLevel::Info.color_code(), colored::Color::Blue);
        assert_eq!(LogLevel::Warn.color_code(), colored::Color::Yellow);
        assert_eq!(LogLevel::Error.color_code(), colored::Color::Red);
    }
}
