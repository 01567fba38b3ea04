//! Level-based file logging
//!
//! One append-only text file per [`LogLevel`] lives in the log directory:
//!
//! ```text
//! logs/
//! ├── debug_log.txt
//! ├── info_log.txt
//! ├── warning_log.txt
//! ├── error_log.txt                   # also receives write-failure diagnostics
//! └── info_log.txt.20240201093000     # rotated backup, never read back
//! ```
//!
//! Each line has the form `[<timestamp>] [<level>] <message>`.
//!
//! There is no locking around the size check, rotation and append. Two
//! writers sharing a directory may overshoot the rotation threshold or race
//! on the rename.

mod file_writer;
mod reader;
mod retention;
mod writer;

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{is_valid_date_format, LoggerConfig};
use crate::error::{LogError, Result};
use crate::level::LogLevel;

pub use file_writer::{init_tracing, tracing_layer, LevelMakeWriter, LevelWriter};
pub use reader::{parse_timestamp, timestamp_token};
pub use retention::DEFAULT_RETENTION_DAYS;
pub use writer::format_entry;

/// File logger writing one file per level
#[derive(Debug, Clone)]
pub struct Logger {
    config: LoggerConfig,
    error_file_path: PathBuf,
}

impl Logger {
    /// Create a logger for `log_dir` with the default threshold and timestamp format
    ///
    /// The directory (and its parents) is created if missing.
    pub fn new(log_dir: impl Into<PathBuf>) -> Result<Self> {
        Self::with_config(LoggerConfig::new(log_dir))
    }

    /// Create a logger from a full configuration
    pub fn with_config(config: LoggerConfig) -> Result<Self> {
        if !is_valid_date_format(&config.date_format) {
            return Err(LogError::InvalidDateFormat(config.date_format));
        }

        if !config.log_dir.exists() {
            fs::create_dir_all(&config.log_dir)?;
            tracing::debug!("Created log directory {}", config.log_dir.display());
        }

        let error_file_path = config.log_dir.join(LogLevel::Error.file_name());

        Ok(Self {
            config,
            error_file_path,
        })
    }

    /// Configuration this logger was built with
    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Directory holding the level files
    pub fn log_dir(&self) -> &Path {
        &self.config.log_dir
    }

    /// Canonical (currently active) file for a level
    pub fn level_file_path(&self, level: LogLevel) -> PathBuf {
        self.config.log_dir.join(level.file_name())
    }

    /// File receiving diagnostics for failed writes
    pub fn error_file_path(&self) -> &Path {
        &self.error_file_path
    }

    /// Log a message at a level given by name
    ///
    /// Returns [`crate::LogError::InvalidLevel`] for names outside
    /// debug/info/warning/error, without touching the disk. Write failures
    /// are never returned; see [`Logger::log_level`].
    pub fn log(&self, level: &str, message: &str) -> Result<()> {
        let level: LogLevel = level.parse()?;
        self.log_level(level, message);
        Ok(())
    }

    pub fn debug(&self, message: &str) {
        self.log_level(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log_level(LogLevel::Info, message);
    }

    pub fn warning(&self, message: &str) {
        self.log_level(LogLevel::Warning, message);
    }

    pub fn error(&self, message: &str) {
        self.log_level(LogLevel::Error, message);
    }
}
