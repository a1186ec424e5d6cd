//! Error types for the necrolog facility

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration could not be loaded or extracted
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] Box<figment::Error>),

    /// File appender error with path
    #[error("File appender error for '{path}': {message}")]
    FileAppenderError { path: String, message: String },

    /// File rotation error
    #[error("File rotation failed for '{path}': {message}")]
    FileRotationError { path: String, message: String },

    /// Formatter error with format type
    #[error("Formatter error ({format_type}): {message}")]
    FormatterError {
        format_type: String,
        message: String,
    },

    /// The retention directory could not be prepared or listed
    #[error("Retention scan of '{path}' failed: {message}")]
    RetentionScan {
        path: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Request to the ingestion endpoint could not be completed
    #[cfg(feature = "http")]
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Rejected ingestion request
    #[error("{0}")]
    InvalidRequest(String),
}

impl LoggerError {
    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file appender error
    pub fn file_appender(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileAppenderError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a file rotation error
    pub fn file_rotation(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileRotationError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a formatter error
    pub fn formatter(format_type: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FormatterError {
            format_type: format_type.into(),
            message: message.into(),
        }
    }

    /// Create a retention scan error
    pub fn retention_scan(
        path: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::RetentionScan {
            path: path.into(),
            message: message.into(),
            source,
        }
    }

    /// Create an ingestion validation error
    pub fn invalid_request<S: Into<String>>(msg: S) -> Self {
        LoggerError::InvalidRequest(msg.into())
    }
}

impl From<figment::Error> for LoggerError {
    fn from(err: figment::Error) -> Self {
        LoggerError::Configuration(Box::new(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = LoggerError::file_appender("/var/log/app.log", "Permission denied");
        assert!(matches!(err, LoggerError::FileAppenderError { .. }));

        let err = LoggerError::invalid_request("missing path or msg");
        assert!(matches!(err, LoggerError::InvalidRequest(_)));
    }

    #[test]
    fn test_error_display() {
        let err = LoggerError::file_rotation("/var/log/app.log", "Disk full");
        assert_eq!(
            err.to_string(),
            "File rotation failed for '/var/log/app.log': Disk full"
        );

        let err = LoggerError::formatter("JSON", "Invalid field type");
        assert_eq!(err.to_string(), "Formatter error (JSON): Invalid field type");

        let err = LoggerError::invalid_request("invalid json");
        assert_eq!(err.to_string(), "invalid json");
    }

    #[test]
    fn test_retention_scan_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = LoggerError::retention_scan("/var/log/japp", "cannot list directory", io_err);

        assert!(err.to_string().contains("/var/log/japp"));
        assert!(err.to_string().contains("cannot list directory"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
