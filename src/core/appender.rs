//! Appender trait for log output destinations

use super::{error::Result, log_entry::LogEntry};

/// A sink shared by every logger of one registry.
///
/// The dispatcher calls appenders while holding its appender lock, one entry
/// at a time. A panic inside `append` or `flush` is caught and reported; the
/// remaining appenders still receive the entry.
pub trait Appender: Send + Sync {
    fn append(&mut self, entry: &LogEntry) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
    fn name(&self) -> &str;
}
