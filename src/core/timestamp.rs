//! Timestamp formatting utilities
//!
//! Provides configurable timestamp formats for the `[<timestamp>]` prefix of
//! every log line. Timestamps are rendered in local time.

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Default pattern for log lines: `2025-01-08 10:30:45`
pub const DEFAULT_TIMESTAMP_PATTERN: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use channel_logger::TimestampFormat;
/// use chrono::Local;
///
/// let format = TimestampFormat::Custom("%Y/%m/%d".to_string());
/// let rendered = format.format(&Local::now());
/// assert_eq!(rendered.len(), 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds and offset: `2025-01-08T10:30:45.123+02:00`
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45.123456+02:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl Default for TimestampFormat {
    fn default() -> Self {
        TimestampFormat::Custom(DEFAULT_TIMESTAMP_PATTERN.to_string())
    }
}

impl TimestampFormat {
    /// Format a local `DateTime` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        let mut out = String::new();
        self.write_to(datetime, &mut out);
        out
    }

    /// Append the formatted timestamp to `out`
    ///
    /// A custom pattern chrono cannot render falls back to RFC 3339 instead
    /// of panicking inside `Display`.
    pub fn write_to(&self, datetime: &DateTime<Local>, out: &mut String) {
        match self {
            TimestampFormat::Iso8601 => {
                let _ = write!(out, "{}", datetime.format("%Y-%m-%dT%H:%M:%S%.3f%:z"));
            }
            TimestampFormat::Rfc3339 => out.push_str(&datetime.to_rfc3339()),
            TimestampFormat::Unix => {
                let _ = write!(out, "{}", datetime.timestamp());
            }
            TimestampFormat::UnixMillis => {
                let _ = write!(out, "{}", datetime.timestamp_millis());
            }
            TimestampFormat::Custom(pattern) => {
                let start = out.len();
                if write!(out, "{}", datetime.format(pattern)).is_err() {
                    out.truncate(start);
                    out.push_str(&datetime.to_rfc3339());
                }
            }
        }
    }

    /// Check that this format is usable for log lines
    ///
    /// Rejects an empty custom pattern and one containing specifiers chrono
    /// does not understand.
    pub fn validate(&self) -> std::result::Result<(), String> {
        match self {
            TimestampFormat::Custom(pattern) if pattern.is_empty() => {
                Err("timestamp format must not be empty".to_string())
            }
            TimestampFormat::Custom(pattern) => {
                if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                    Err(format!("invalid timestamp pattern '{}'", pattern))
                } else {
                    Ok(())
                }
            }
            _ => Ok(()),
        }
    }

    /// Check if this is a Unix-based numeric format
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, TimestampFormat::Unix | TimestampFormat::UnixMillis)
    }
}
