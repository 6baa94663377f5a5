//! Named logger handle

use super::{
    contextual::ContextualLogger,
    dispatcher::Dispatcher,
    error::Result,
    log_context::LogContext,
    log_entry::LogEntry,
    log_level::LogLevel,
};
use std::fmt;
use std::sync::Arc;

/// A logger bound to a name.
///
/// Handles are created by [`LoggerRegistry`](crate::LoggerRegistry) and
/// handed out as `Arc<Logger>`; the registry returns the same `Arc` for
/// every lookup of a name. All handles of one registry share a
/// [`Dispatcher`], so levels set through one handle are seen by every
/// lookup of that name.
pub struct Logger {
    name: String,
    dispatcher: Arc<Dispatcher>,
}

impl Logger {
    pub(crate) fn new(name: impl Into<String>, dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            name: name.into(),
            dispatcher,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Level set explicitly on this logger, if any
    pub fn level(&self) -> Option<LogLevel> {
        self.dispatcher.level_for(&self.name)
    }

    /// Set (`Some`) or clear (`None`) this logger's own level.
    ///
    /// A cleared logger inherits from its nearest configured ancestor, or
    /// the root level.
    pub fn set_level(&self, level: Option<LogLevel>) {
        self.dispatcher.set_level_for(&self.name, level);
    }

    pub fn effective_level(&self) -> LogLevel {
        self.dispatcher.effective_level(&self.name)
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.effective_level()
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        if !self.check_level(level) {
            return;
        }
        let entry = LogEntry::new(self.name.as_str(), level, message.into());
        self.dispatcher.dispatch(entry);
    }

    /// Log with structured context fields
    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        context: LogContext,
    ) {
        if !self.check_level(level) {
            return;
        }
        let entry =
            LogEntry::new(self.name.as_str(), level, message.into()).with_context(context);
        self.dispatcher.dispatch(entry);
    }

    fn check_level(&self, level: LogLevel) -> bool {
        let enabled = self.is_enabled(level);
        if !enabled {
            self.dispatcher.metrics().record_filtered();
        }
        enabled
    }

    #[inline]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, message);
    }

    #[inline]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    #[inline]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, message);
    }

    #[inline]
    pub fn warn(&self, message: impl Into<String>) {
        self.log(LogLevel::Warn, message);
    }

    #[inline]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    #[inline]
    pub fn fatal(&self, message: impl Into<String>) {
        self.log(LogLevel::Fatal, message);
    }

    /// Wrap this handle so every call carries `context`
    pub fn with_context(self: &Arc<Self>, context: LogContext) -> ContextualLogger {
        ContextualLogger::new(Arc::clone(self), context)
    }

    pub fn flush(&self) -> Result<()> {
        self.dispatcher.flush()
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("effective_level", &self.effective_level())
            .finish()
    }
}
