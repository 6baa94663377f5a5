//! Timestamp formatting utilities

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// strftime pattern used by the standard text layout
pub const STANDARD_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use logger_registry::TimestampFormat;
/// use chrono::{TimeZone, Utc};
///
/// let at = Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::standard().format(&at), "2025-01-08 10:30:45");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// RFC 3339 format: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// `2025-01-08 10:30:45`, the layout used by console output
    pub fn standard() -> Self {
        TimestampFormat::Custom(STANDARD_DATE_FORMAT.to_string())
    }

    /// Reject custom patterns chrono cannot render
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(ref pattern) = self {
            if pattern.is_empty() {
                return Err(LoggerError::config(
                    "TimestampFormat",
                    "custom timestamp format is empty",
                ));
            }
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(LoggerError::config(
                    "TimestampFormat",
                    format!("invalid strftime pattern '{}'", pattern),
                ));
            }
        }
        Ok(())
    }

    /// Render `datetime`. A custom pattern chrono rejects renders with the
    /// standard layout instead.
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            TimestampFormat::Rfc3339 => datetime.to_rfc3339(),
            TimestampFormat::Unix => datetime.timestamp().to_string(),
            TimestampFormat::UnixMillis => datetime.timestamp_millis().to_string(),
            TimestampFormat::Custom(format_str) => {
                let mut out = String::new();
                // DelayedFormat reports bad items as fmt::Error instead of text
                if write!(out, "{}", datetime.format(format_str)).is_err() {
                    out.clear();
                    let _ = write!(out, "{}", datetime.format(STANDARD_DATE_FORMAT));
                }
                out
            }
        }
    }
}
