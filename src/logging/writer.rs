//! Write path: format, rotate, append, fall back to the error file

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::config::ROTATION_SUFFIX_FORMAT;
use crate::error::write_failure_cause;
use crate::level::LogLevel;

use super::Logger;

/// Format a single log line, including the trailing newline
pub fn format_entry(timestamp: &str, level: LogLevel, message: &str) -> String {
    format!("[{}] [{}] {}\n", timestamp, level, message)
}

impl Logger {
    /// Log a message at a known level
    ///
    /// Rotates the level file first if it is over the size threshold. If the
    /// append fails, a diagnostic is appended to the error file instead; if
    /// that fails too, the message is dropped.
    pub fn log_level(&self, level: LogLevel, message: &str) {
        let now = Local::now();
        let path = self.level_file_path(level);
        let timestamp = now.format(&self.config.date_format).to_string();
        let entry = format_entry(&timestamp, level, message);

        self.rotate_if_needed(&path, &now);
        self.append_or_divert(&path, &entry);
    }

    fn rotate_if_needed(&self, path: &Path, now: &DateTime<Local>) {
        let size = match fs::metadata(path) {
            Ok(metadata) => metadata.len(),
            Err(_) => return,
        };

        if size <= self.config.max_file_size {
            return;
        }

        match rotate_file(path, now) {
            Ok(backup) => tracing::debug!(
                size,
                "Rotated {} to {}",
                path.display(),
                backup.display()
            ),
            // The append below still goes to the oversized file
            Err(e) => tracing::warn!("Failed to rotate {}: {}", path.display(), e),
        }
    }

    /// Primary write to the level file, secondary write to the error file
    fn append_or_divert(&self, path: &Path, entry: &str) {
        let primary_err = match append(path, entry) {
            Ok(()) => return,
            Err(e) => e,
        };

        let cause = write_failure_cause(&primary_err);
        tracing::warn!(
            cause,
            "Error writing to log file {}: {}",
            path.display(),
            primary_err
        );

        let diagnostic = format!(
            "Error writing to log file: {}\nOriginal log message: {}",
            path.display(),
            entry
        );

        if let Err(e) = append(&self.error_file_path, &diagnostic) {
            tracing::error!(
                "Dropping log message, error file {} is not writable either: {}",
                self.error_file_path.display(),
                e
            );
        }
    }
}

/// Rename `path` to `<path>.<YYYYMMDDHHMMSS>`
///
/// An existing backup with the same name is left to the platform's rename
/// semantics (replaced on Unix).
fn rotate_file(path: &Path, now: &DateTime<Local>) -> io::Result<PathBuf> {
    let mut backup = path.as_os_str().to_owned();
    backup.push(".");
    backup.push(now.format(ROTATION_SUFFIX_FORMAT).to_string());
    let backup = PathBuf::from(backup);

    fs::rename(path, &backup)?;
    Ok(backup)
}

fn append(path: &Path, content: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(content.as_bytes())
}
