//! Shared sink behind every logger handle of one registry
//!
//! Holds the root level, per-name level overrides, the appender list, the
//! ambient context and the metrics. Two handles backed by the same
//! dispatcher write to the same appenders, which is what makes loggers of
//! the same name behaviourally identical.

use super::{
    appender::Appender,
    error::{LoggerError, Result},
    log_context::LoggerContext,
    log_entry::LogEntry,
    log_level::LogLevel,
    metrics::LoggerMetrics,
};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;

pub struct Dispatcher {
    root_level: RwLock<LogLevel>,
    levels: RwLock<HashMap<String, LogLevel>>,
    appenders: RwLock<Vec<Box<dyn Appender>>>,
    context: LoggerContext,
    metrics: LoggerMetrics,
}

impl Dispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self {
            root_level: RwLock::new(LogLevel::Info),
            levels: RwLock::new(HashMap::new()),
            appenders: RwLock::new(Vec::new()),
            context: LoggerContext::new(),
            metrics: LoggerMetrics::new(),
        }
    }

    pub fn root_level(&self) -> LogLevel {
        *self.root_level.read()
    }

    pub fn set_root_level(&self, level: LogLevel) {
        *self.root_level.write() = level;
    }

    /// Level set explicitly on `name`, ignoring ancestors
    pub fn level_for(&self, name: &str) -> Option<LogLevel> {
        self.levels.read().get(name).copied()
    }

    /// Set or clear the explicit level of `name`
    pub fn set_level_for(&self, name: &str, level: Option<LogLevel>) {
        let mut levels = self.levels.write();
        match level {
            Some(level) => {
                levels.insert(name.to_string(), level);
            }
            None => {
                levels.remove(name);
            }
        }
    }

    /// Nearest explicit level on `name` or one of its ancestors, else the root level
    pub fn effective_level(&self, name: &str) -> LogLevel {
        {
            let levels = self.levels.read();
            if !levels.is_empty() {
                if let Some(level) = ancestors(name).find_map(|n| levels.get(n)) {
                    return *level;
                }
            }
        }
        self.root_level()
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.appenders.write().push(appender);
    }

    /// Swap out every appender, flushing the old ones first
    pub fn replace_appenders(&self, appenders: Vec<Box<dyn Appender>>) {
        let mut guard = self.appenders.write();
        for (idx, old) in guard.iter_mut().enumerate() {
            if let Err(e) = flush_isolated(idx, old.as_mut()) {
                eprintln!("[LOGGER ERROR] Appender #{} flush failed on replace: {}", idx, e);
            }
        }
        *guard = appenders;
    }

    pub fn appender_names(&self) -> Vec<String> {
        self.appenders
            .read()
            .iter()
            .map(|a| a.name().to_string())
            .collect()
    }

    pub fn context(&self) -> &LoggerContext {
        &self.context
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        &self.metrics
    }

    /// Merge ambient fields into `entry` and hand it to every appender.
    ///
    /// Each appender call is wrapped in `catch_unwind`; a failing or
    /// panicking appender marks the entry as dropped but does not stop the
    /// others. Returns `true` when every appender accepted the entry.
    pub fn dispatch(&self, mut entry: LogEntry) -> bool {
        if !self.context.is_empty() {
            let mut ctx = entry.context.take().unwrap_or_default();
            self.context.merge_into(&mut ctx);
            entry.context = Some(ctx);
        }

        let mut appenders = self.appenders.write();
        if appenders.is_empty() {
            return false;
        }

        let mut has_error = false;
        for (idx, appender) in appenders.iter_mut().enumerate() {
            let append_result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                appender.append(&entry)
            }));

            match append_result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Appender #{} ({}) failed: {}",
                        idx,
                        appender.name(),
                        e
                    );
                    has_error = true;
                }
                Err(panic_info) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Appender #{} panicked: {}. \
                         Other appenders continue to function.",
                        idx,
                        panic_message(panic_info.as_ref())
                    );
                    has_error = true;
                }
            }
        }

        if has_error {
            self.metrics.record_dropped();
        } else {
            self.metrics.record_logged();
        }
        !has_error
    }

    /// Flush every appender, returning the first error after trying all of
    /// them. A panicking flush is reported as an appender error.
    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for (idx, appender) in self.appenders.write().iter_mut().enumerate() {
            if let Err(e) = flush_isolated(idx, appender.as_mut()) {
                first_error.get_or_insert(e);
            }
        }
        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("root_level", &self.root_level())
            .field("levels", &*self.levels.read())
            .field("appenders", &self.appender_names())
            .finish()
    }
}

fn flush_isolated(idx: usize, appender: &mut dyn Appender) -> Result<()> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| appender.flush())) {
        Ok(result) => result,
        Err(panic_info) => {
            let message = panic_message(panic_info.as_ref());
            eprintln!(
                "[LOGGER CRITICAL] Appender #{} panicked during flush: {}",
                idx, message
            );
            Err(LoggerError::appender(
                appender.name(),
                format!("panicked during flush: {}", message),
            ))
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// `name` followed by each parent name, splitting on `.` and `::`.
///
/// `"hyper::client.pool"` yields `"hyper::client.pool"`, `"hyper::client"`, `"hyper"`.
pub(crate) fn ancestors(name: &str) -> Ancestors<'_> {
    Ancestors {
        next: Some(name).filter(|n| !n.is_empty()),
    }
}

pub(crate) struct Ancestors<'a> {
    next: Option<&'a str>,
}

impl<'a> Iterator for Ancestors<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let current = self.next?;
        self.next = parent_name(current);
        Some(current)
    }
}

fn parent_name(name: &str) -> Option<&str> {
    let cut = match (name.rfind('.'), name.rfind("::")) {
        (Some(dot), Some(colons)) => dot.max(colons),
        (Some(dot), None) => dot,
        (None, Some(colons)) => colons,
        (None, None) => return None,
    };
    Some(&name[..cut]).filter(|parent| !parent.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LoggerError;

    struct FailingAppender;

    impl Appender for FailingAppender {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            Err(LoggerError::appender("failing", "always fails"))
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "failing"
        }
    }

    struct PanickingAppender;

    impl Appender for PanickingAppender {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            panic!("appender exploded");
        }
        fn flush(&mut self) -> Result<()> {
            Ok(())
        }
        fn name(&self) -> &str {
            "panicking"
        }
    }

    struct FlushPanickingAppender;

    impl Appender for FlushPanickingAppender {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            Ok(())
        }
        fn flush(&mut self) -> Result<()> {
            panic!("flush exploded");
        }
        fn name(&self) -> &str {
            "flush-panicking"
        }
    }

    #[test]
    fn test_ancestors() {
        let names: Vec<&str> = ancestors("hyper::client.pool").collect();
        assert_eq!(names, vec!["hyper::client.pool", "hyper::client", "hyper"]);

        let names: Vec<&str> = ancestors("PaymentService").collect();
        assert_eq!(names, vec!["PaymentService"]);

        let names: Vec<&str> = ancestors(".hidden").collect();
        assert_eq!(names, vec![".hidden"]);

        let names: Vec<&str> = ancestors("a..b").collect();
        assert_eq!(names, vec!["a..b", "a.", "a"]);

        assert_eq!(ancestors("").count(), 0);
    }

    #[test]
    fn test_effective_level_inherits_from_ancestor() {
        let dispatcher = Dispatcher::new();
        dispatcher.set_level_for("hyper", Some(LogLevel::Warn));

        assert_eq!(dispatcher.effective_level("hyper::client"), LogLevel::Warn);
        assert_eq!(dispatcher.effective_level("hyperx"), LogLevel::Info);

        dispatcher.set_level_for("hyper::client", Some(LogLevel::Debug));
        assert_eq!(dispatcher.effective_level("hyper::client"), LogLevel::Debug);

        dispatcher.set_level_for("hyper", None);
        dispatcher.set_root_level(LogLevel::Error);
        assert_eq!(dispatcher.effective_level("hyper"), LogLevel::Error);
        assert_eq!(dispatcher.level_for("hyper::client"), Some(LogLevel::Debug));
    }

    #[test]
    fn test_dispatch_without_appenders() {
        let dispatcher = Dispatcher::new();
        let entry = LogEntry::new("x", LogLevel::Info, "ignored".to_string());
        assert!(!dispatcher.dispatch(entry));
        assert_eq!(dispatcher.metrics().total_logged(), 0);
    }

    #[test]
    fn test_failing_and_panicking_appenders_are_isolated() {
        let dispatcher = Dispatcher::new();
        dispatcher.add_appender(Box::new(FailingAppender));
        dispatcher.add_appender(Box::new(PanickingAppender));

        let entry = LogEntry::new("x", LogLevel::Info, "boom".to_string());
        assert!(!dispatcher.dispatch(entry));
        assert_eq!(dispatcher.metrics().dropped_count(), 1);

        // The lock survives the panic
        assert_eq!(dispatcher.appender_names(), vec!["failing", "panicking"]);
    }

    #[test]
    fn test_replace_appenders() {
        let dispatcher = Dispatcher::new();
        dispatcher.add_appender(Box::new(FailingAppender));
        dispatcher.replace_appenders(vec![Box::new(PanickingAppender)]);
        assert_eq!(dispatcher.appender_names(), vec!["panicking"]);
    }

    #[test]
    fn test_panicking_flush_is_isolated() {
        let sink = crate::appenders::MemoryAppender::new();
        let captured = sink.handle();

        let dispatcher = Dispatcher::new();
        dispatcher.add_appender(Box::new(FlushPanickingAppender));
        dispatcher.add_appender(Box::new(sink));

        assert!(matches!(
            dispatcher.flush(),
            Err(LoggerError::AppenderError { ref appender, .. }) if appender == "flush-panicking"
        ));

        // Still usable after the panic
        assert!(dispatcher.dispatch(LogEntry::new("x", LogLevel::Info, "after".to_string())));
        assert_eq!(captured.messages(), vec!["after"]);

        dispatcher.replace_appenders(Vec::new());
        assert!(dispatcher.appender_names().is_empty());
        assert!(dispatcher.flush().is_ok());
    }
}
