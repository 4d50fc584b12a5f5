//! Logging Types
//!
//! `logging/setLevel` params and the `notifications/message` payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Log levels (matching syslog severity)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Notice,
    Warning,
    Error,
    Critical,
    Alert,
    Emergency,
}

/// Maps a `tracing` level onto the closest client-facing level. TRACE folds
/// into `Debug`.
impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        if level == tracing::Level::ERROR {
            LogLevel::Error
        } else if level == tracing::Level::WARN {
            LogLevel::Warning
        } else if level == tracing::Level::INFO {
            LogLevel::Info
        } else {
            LogLevel::Debug
        }
    }
}

/// Set log level request parameters
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SetLevelParams {
    pub level: LogLevel,
}

/// Log message notification
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogMessage {
    /// Severity level
    pub level: LogLevel,

    /// Logger name (e.g., module path)
    #[serde(default, skip_serializing_if = "crate::codec::omit_none")]
    pub logger: Option<String>,

    /// Arbitrary payload; a string for plain messages
    pub data: Value,
}

impl LogMessage {
    pub fn new(level: LogLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            logger: None,
            data: Value::String(message.into()),
        }
    }

    pub fn with_logger(mut self, logger: impl Into<String>) -> Self {
        self.logger = Some(logger.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Error > LogLevel::Warning);
        assert!(LogLevel::Warning > LogLevel::Info);
        assert!(LogLevel::Info > LogLevel::Debug);
    }

    #[test]
    fn test_log_level_serialization() {
        let json = serde_json::to_value(LogLevel::Warning).unwrap();
        assert_eq!(json, "warning");

        let level: LogLevel = serde_json::from_value(json).unwrap();
        assert_eq!(level, LogLevel::Warning);
    }

    #[test]
    fn test_log_message_serialization() {
        let msg = LogMessage::new(LogLevel::Info, "Test message").with_logger("libretto::registry");

        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["level"], "info");
        assert_eq!(json["logger"], "libretto::registry");
        assert_eq!(json["data"], "Test message");
    }

    #[test]
    fn test_tracing_level_conversion() {
        assert_eq!(LogLevel::from(tracing::Level::TRACE), LogLevel::Debug);
        assert_eq!(LogLevel::from(tracing::Level::DEBUG), LogLevel::Debug);
        assert_eq!(LogLevel::from(tracing::Level::INFO), LogLevel::Info);
        assert_eq!(LogLevel::from(tracing::Level::WARN), LogLevel::Warning);
        assert_eq!(LogLevel::from(tracing::Level::ERROR), LogLevel::Error);
    }
}
