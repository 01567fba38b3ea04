//! Configuration management for Tierlog

use anyhow::{Context, Result};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::{Path, PathBuf};

/// Default rotation threshold in bytes
///
/// Roughly 1 MB: 1,024,000 bytes, not a round 1,000,000.
pub const DEFAULT_MAX_FILE_SIZE: u64 = 1_024_000;

/// Default timestamp format written at the start of each line
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Suffix appended to a level file when it is rotated
pub const ROTATION_SUFFIX_FORMAT: &str = "%Y%m%d%H%M%S";

/// Logger configuration
///
/// All values are fixed once a [`crate::Logger`] is constructed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoggerConfig {
    /// Directory holding the per-level log files
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,

    /// A level file larger than this (in bytes) is rotated before the next append
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// chrono format string for the line timestamp
    ///
    /// Must not produce a `]` character, since readers split on the first one.
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

fn default_log_dir() -> PathBuf {
    config_dir().join("logs")
}

fn default_max_file_size() -> u64 {
    DEFAULT_MAX_FILE_SIZE
}

fn default_date_format() -> String {
    DEFAULT_DATE_FORMAT.to_string()
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: default_log_dir(),
            max_file_size: default_max_file_size(),
            date_format: default_date_format(),
        }
    }
}

impl LoggerConfig {
    /// Configuration for the given directory with default threshold and format
    pub fn new(log_dir: impl Into<PathBuf>) -> Self {
        Self {
            log_dir: log_dir.into(),
            ..Self::default()
        }
    }

    /// Override the rotation threshold
    pub fn with_max_file_size(mut self, bytes: u64) -> Self {
        self.max_file_size = bytes;
        self
    }

    /// Override the timestamp format
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Load configuration from a TOML file
    ///
    /// A leading `~` in `log_dir` is expanded to the home directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).context("Failed to parse config file")?;
        config.log_dir = expand_home(&config.log_dir);
        Ok(config)
    }

    /// Serialize configuration to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("Failed to serialize config")
    }
}

/// Check that a timestamp format is usable in log lines
///
/// Rejects any literal `]` and anything chrono fails to render, which covers
/// unknown specifiers and parse-only ones such as `%#z`.
pub fn is_valid_date_format(format: &str) -> bool {
    if format.contains(']') {
        return false;
    }
    let mut rendered = String::new();
    write!(rendered, "{}", Local::now().format(format)).is_ok()
}

fn expand_home(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&path_str).into_owned())
}

/// Get the base directory (~/.tierlog)
/// Falls back to ./.tierlog if home directory cannot be determined
pub fn config_dir() -> PathBuf {
    try_config_dir().unwrap_or_else(|| {
        tracing::warn!("Could not determine home directory, using current directory for logs");
        PathBuf::from(".tierlog")
    })
}

/// Try to get the base directory, returning None if home dir is unavailable
pub fn try_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".tierlog"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = LoggerConfig::default();
        assert_eq!(config.max_file_size, 1_024_000);
        assert_eq!(config.date_format, "%Y-%m-%d %H:%M:%S");
        assert!(config.log_dir.ends_with("logs"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = LoggerConfig::new("/var/log/app")
            .with_max_file_size(10)
            .with_date_format("%Y-%m-%dT%H:%M:%S");
        assert_eq!(config.log_dir, PathBuf::from("/var/log/app"));
        assert_eq!(config.max_file_size, 10);
        assert_eq!(config.date_format, "%Y-%m-%dT%H:%M:%S");
    }

    #[test]
    fn test_config_serialization() {
        let config = LoggerConfig::new("/tmp/tierlog").with_max_file_size(2048);
        let toml_str = config.to_toml().unwrap();
        let parsed = LoggerConfig::from_toml(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let parsed = LoggerConfig::from_toml("log_dir = \"/srv/logs\"").unwrap();
        assert_eq!(parsed.log_dir, PathBuf::from("/srv/logs"));
        assert_eq!(parsed.max_file_size, DEFAULT_MAX_FILE_SIZE);
        assert_eq!(parsed.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn test_tilde_expansion() {
        let parsed = LoggerConfig::from_toml("log_dir = \"~/app-logs\"").unwrap();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(parsed.log_dir, home.join("app-logs"));
        }
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tierlog.toml");
        std::fs::write(&path, "log_dir = \"/srv/logs\"\nmax_file_size = 512\n").unwrap();

        let config = LoggerConfig::load(&path).unwrap();
        assert_eq!(config.max_file_size, 512);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = LoggerConfig::load(temp_dir.path().join("missing.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_is_valid_date_format() {
        assert!(is_valid_date_format(DEFAULT_DATE_FORMAT));
        assert!(is_valid_date_format("%d.%m.%Y"));
        assert!(!is_valid_date_format("%Y-%m-%d]"));
        assert!(!is_valid_date_format("%Q"));
    }

    #[test]
    fn test_parse_only_specifier_rejected() {
        assert!(!is_valid_date_format("%Y-%m-%d %#z"));
    }

    #[test]
    fn test_config_dir_does_not_panic() {
        let dir = config_dir();
        assert!(dir.ends_with(".tierlog"));
    }
}
