//! Logger metrics for observability
//!
//! Counters shared by every logger of one registry.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use logger_registry::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
/// metrics.record_logged();
/// metrics.record_dropped();
///
/// assert_eq!(metrics.total_logged(), 1);
/// assert_eq!(metrics.dropped_count(), 1);
/// assert_eq!(metrics.drop_rate(), 50.0);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Entries every appender accepted
    total_logged: AtomicU64,

    /// Entries at least one appender failed on
    dropped_count: AtomicU64,

    /// Calls below the logger's effective level
    filtered_count: AtomicU64,

    /// Distinct logger handles created by the registry
    loggers_created: AtomicU64,
}

impl LoggerMetrics {
    pub const fn new() -> Self {
        Self {
            total_logged: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
            filtered_count: AtomicU64::new(0),
            loggers_created: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn total_logged(&self) -> u64 {
        self.total_logged.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn filtered_count(&self) -> u64 {
        self.filtered_count.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn loggers_created(&self) -> u64 {
        self.loggers_created.load(Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_logged(&self) -> u64 {
        self.total_logged.fetch_add(1, Ordering::Relaxed)
    }

    /// Returns the previous value
    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.filtered_count.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_logger_created(&self) -> u64 {
        self.loggers_created.fetch_add(1, Ordering::Relaxed)
    }

    /// Percentage of dispatched entries that were dropped
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped_count() as f64;
        let total = dropped + self.total_logged() as f64;
        if total == 0.0 {
            0.0
        } else {
            dropped / total * 100.0
        }
    }

    /// Reset the entry counters. `loggers_created` is left alone because
    /// registry entries are never removed.
    pub fn reset(&self) {
        self.total_logged.store(0, Ordering::Relaxed);
        self.dropped_count.store(0, Ordering::Relaxed);
        self.filtered_count.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.total_logged(), 0);
        assert_eq!(metrics.dropped_count(), 0);
        assert_eq!(metrics.filtered_count(), 0);
        assert_eq!(metrics.loggers_created(), 0);
        assert_eq!(metrics.drop_rate(), 0.0);
    }

    #[test]
    fn test_record_returns_previous() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.record_filtered(), 0);
        assert_eq!(metrics.record_filtered(), 1);
        assert_eq!(metrics.filtered_count(), 2);
    }

    #[test]
    fn test_metrics_reset_keeps_logger_count() {
        let metrics = LoggerMetrics::new();
        metrics.record_logged();
        metrics.record_dropped();
        metrics.record_logger_created();

        metrics.reset();
        assert_eq!(metrics.total_logged(), 0);
        assert_eq!(metrics.dropped_count(), 0);
        assert_eq!(metrics.loggers_created(), 1);
    }
}
