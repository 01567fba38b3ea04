//! Log levels
//!
//! The level set is closed: every level maps to exactly one file in the log
//! directory, and levels are compared for equality only.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Log level, one per log file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// All levels in retrieval order
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warning,
        LogLevel::Error,
    ];

    /// Name as written inside log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warning => "warning",
            LogLevel::Error => "error",
        }
    }

    /// Canonical file name for this level, e.g. `info_log.txt`
    pub fn file_name(&self) -> String {
        format!("{}_log.txt", self.as_str())
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = LogError;

    /// Exact, case-sensitive match against the four level names
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogLevel::ALL
            .into_iter()
            .find(|level| level.as_str() == s)
            .ok_or_else(|| LogError::InvalidLevel(s.to_string()))
    }
}

impl From<tracing::Level> for LogLevel {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::TRACE | tracing::Level::DEBUG => LogLevel::Debug,
            tracing::Level::INFO => LogLevel::Info,
            tracing::Level::WARN => LogLevel::Warning,
            tracing::Level::ERROR => LogLevel::Error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_levels() {
        assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
        assert_eq!("info".parse::<LogLevel>().unwrap(), LogLevel::Info);
        assert_eq!("warning".parse::<LogLevel>().unwrap(), LogLevel::Warning);
        assert_eq!("error".parse::<LogLevel>().unwrap(), LogLevel::Error);
    }

    #[test]
    fn test_parse_rejects_unknown_levels() {
        for name in ["warn", "INFO", "fatal", "", " info"] {
            let err = name.parse::<LogLevel>().unwrap_err();
            assert!(matches!(err, LogError::InvalidLevel(ref s) if s == name));
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(LogLevel::Debug.file_name(), "debug_log.txt");
        assert_eq!(LogLevel::Warning.file_name(), "warning_log.txt");
    }

    #[test]
    fn test_from_tracing_level() {
        assert_eq!(LogLevel::from(tracing::Level::TRACE), LogLevel::Debug);
        assert_eq!(LogLevel::from(tracing::Level::WARN), LogLevel::Warning);
        assert_eq!(LogLevel::from(tracing::Level::ERROR), LogLevel::Error);
    }

    #[test]
    fn test_serde_names() {
        #[derive(Serialize, Deserialize)]
        struct Wrapper {
            level: LogLevel,
        }

        let toml_str = toml::to_string(&Wrapper {
            level: LogLevel::Warning,
        })
        .unwrap();
        assert!(toml_str.contains("\"warning\""));

        let parsed: Wrapper = toml::from_str("level = \"info\"").unwrap();
        assert_eq!(parsed.level, LogLevel::Info);
    }
}
