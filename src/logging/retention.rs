//! Rotated backup inspection and opt-in cleanup
//!
//! The writer never deletes backups. Pruning happens only when a caller asks.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use anyhow::{Context, Result};

use crate::level::LogLevel;

use super::Logger;

/// Suggested retention period in days for [`Logger::cleanup_rotated_backups`]
pub const DEFAULT_RETENTION_DAYS: u64 = 30;

/// Length of the `YYYYMMDDHHMMSS` rotation suffix
const SUFFIX_LEN: usize = 14;

/// Check whether `name` is a rotated backup of `level`'s file
fn is_backup_of(name: &str, level: LogLevel) -> bool {
    let Some(rest) = name.strip_prefix(&level.file_name()) else {
        return false;
    };
    let Some(suffix) = rest.strip_prefix('.') else {
        return false;
    };
    suffix.len() == SUFFIX_LEN && suffix.bytes().all(|b| b.is_ascii_digit())
}

impl Logger {
    /// Rotated backups of a level file, oldest first
    pub fn rotated_backups(&self, level: LogLevel) -> Result<Vec<PathBuf>> {
        let mut backups = Vec::new();

        for entry in fs::read_dir(self.log_dir()).context("Failed to read log directory")? {
            let entry = entry?;
            let is_backup = entry
                .file_name()
                .to_str()
                .is_some_and(|name| is_backup_of(name, level));
            if is_backup {
                backups.push(entry.path());
            }
        }

        // The suffix sorts lexically in time order
        backups.sort();
        Ok(backups)
    }

    /// Delete rotated backups older than `retention_days`
    ///
    /// Age is taken from the file modification time. Returns the number of
    /// files deleted. Canonical level files are never touched.
    pub fn cleanup_rotated_backups(&self, retention_days: u64) -> Result<usize> {
        let retention_duration = Duration::from_secs(retention_days * 24 * 60 * 60);
        let cutoff = SystemTime::now()
            .checked_sub(retention_duration)
            .unwrap_or(SystemTime::UNIX_EPOCH);

        let mut deleted_count = 0;

        for level in LogLevel::ALL {
            for path in self.rotated_backups(level)? {
                let modified = match fs::metadata(&path).and_then(|m| m.modified()) {
                    Ok(modified) => modified,
                    Err(_) => continue,
                };
                if modified < cutoff && fs::remove_file(&path).is_ok() {
                    tracing::debug!("Removed rotated log {}", path.display());
                    deleted_count += 1;
                }
            }
        }

        Ok(deleted_count)
    }
}
