//! Read path: scan level files and filter by level and start date

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::level::LogLevel;

use super::Logger;

/// Date-time layouts tried after the configured format
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
];

/// Date-only layouts, interpreted as midnight
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

impl Logger {
    /// Retrieve raw log lines, optionally filtered by level and start date
    ///
    /// Lines come back in level order (debug, info, warning, error) and in
    /// file order within each level. Only the canonical level files are
    /// read; rotated backups are never included.
    ///
    /// A line is kept when its timestamp is at or after `start_date`. Text
    /// that does not parse as a timestamp counts as the earliest possible
    /// time: such lines are dropped by any real `start_date`, and an
    /// unparseable `start_date` keeps every line.
    pub fn get_logs(&self, level: Option<LogLevel>, start_date: Option<&str>) -> Vec<String> {
        let date_format = self.config.date_format.as_str();
        let lower_bound = start_date.map(|date| parse_timestamp(date, date_format));

        let mut logs = Vec::new();

        for file_level in LogLevel::ALL {
            if level.is_some_and(|wanted| wanted != file_level) {
                continue;
            }

            let Some(content) = read_level_file(&self.level_file_path(file_level)) else {
                continue;
            };

            for line in content.lines().filter(|line| !line.is_empty()) {
                if let Some(bound) = lower_bound {
                    if parse_timestamp(&timestamp_token(line), date_format) < bound {
                        continue;
                    }
                }
                logs.push(line.to_string());
            }
        }

        logs
    }
}

/// Missing files read as empty; other failures are traced and skipped
fn read_level_file(path: &Path) -> Option<String> {
    match fs::read(path) {
        Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!("Failed to read log file {}: {}", path.display(), e);
            None
        }
    }
}

/// Extract the timestamp token of a line: text before the first `]`, minus `[`, trimmed
pub fn timestamp_token(line: &str) -> String {
    let head = line.find(']').map_or(line, |end| &line[..end]);
    head.replace('[', "").trim().to_string()
}

/// Parse a timestamp or date string as local time
///
/// Tries `date_format` first, then the common layouts. Anything unparseable
/// yields [`NaiveDateTime::MIN`].
pub fn parse_timestamp(text: &str, date_format: &str) -> NaiveDateTime {
    let text = text.trim();

    if let Ok(parsed) = NaiveDateTime::parse_from_str(text, date_format) {
        return parsed;
    }

    for format in DATETIME_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(text, format) {
            return parsed;
        }
    }

    for format in std::iter::once(&date_format).chain(DATE_FORMATS) {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date.and_time(chrono::NaiveTime::MIN);
        }
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return parsed.with_timezone(&Local).naive_local();
    }

    NaiveDateTime::MIN
}
