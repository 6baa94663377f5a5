//! Context-injecting logger decorator

use super::{
    log_context::{FieldValue, LogContext},
    log_level::LogLevel,
    logger::Logger,
};
use std::sync::Arc;

/// Forwards every call to the wrapped [`Logger`] with extra context fields.
///
/// Severity and message pass through untouched; only the entry context is
/// enriched. Fields given on an individual call win over the decorator's own.
///
/// # Example
///
/// ```
/// use logger_registry::{LogContext, LoggerRegistry};
///
/// let registry = LoggerRegistry::new();
/// let logger = registry
///     .get("PaymentService")
///     .with_context(LogContext::new().with_field("request_id", "req-7"));
///
/// logger.info("Processing payment");
/// assert_eq!(logger.name(), "PaymentService");
/// ```
#[derive(Debug, Clone)]
pub struct ContextualLogger {
    inner: Arc<Logger>,
    context: LogContext,
}

impl ContextualLogger {
    pub fn new(inner: Arc<Logger>, context: LogContext) -> Self {
        Self { inner, context }
    }

    #[must_use]
    pub fn with_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.context.add_field(key, value);
        self
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub fn inner(&self) -> &Arc<Logger> {
        &self.inner
    }

    pub fn context(&self) -> &LogContext {
        &self.context
    }

    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        self.inner.is_enabled(level)
    }

    pub fn log(&self, level: LogLevel, message: impl Into<String>) {
        self.inner.log_with_context(level, message, self.context.clone());
    }

    pub fn log_with_context(
        &self,
        level: LogLevel,
        message: impl Into<String>,
        mut context: LogContext,
    ) {
        context.merge_missing(&self.context);
        self.inner.log_with_context(level, message, context);
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
}
