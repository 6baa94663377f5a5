//! Name-keyed logger registry

use super::{
    accessor::short_type_name,
    appender::Appender,
    config::LoggingConfig,
    dispatcher::Dispatcher,
    error::Result,
    log_context::{FieldValue, LoggerContext},
    log_level::LogLevel,
    logger::Logger,
    metrics::LoggerMetrics,
};
use crate::appenders::ConsoleAppender;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Hands out one [`Logger`] per name.
///
/// Entries are created lazily on first lookup and never removed. Lookups of
/// the same name always return the same `Arc`, including when several
/// threads race on the first lookup.
///
/// The registry is an ordinary value: construct it once, wrap it in an
/// `Arc` and pass it to whatever needs loggers.
///
/// # Example
///
/// ```
/// use logger_registry::LoggerRegistry;
/// use std::sync::Arc;
///
/// let registry = LoggerRegistry::new();
/// let a = registry.get("PaymentService");
/// let b = registry.get("PaymentService");
/// assert!(Arc::ptr_eq(&a, &b));
/// assert!(!Arc::ptr_eq(&a, &registry.get("InventoryService")));
/// ```
pub struct LoggerRegistry {
    loggers: RwLock<HashMap<String, Arc<Logger>>>,
    dispatcher: Arc<Dispatcher>,
}

impl LoggerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::with_dispatcher(Arc::new(Dispatcher::new()))
    }

    /// Registry whose loggers write through an existing dispatcher
    #[must_use]
    pub fn with_dispatcher(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            loggers: RwLock::new(HashMap::new()),
            dispatcher,
        }
    }

    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Return the logger for `name`, creating it on first use
    pub fn get(&self, name: &str) -> Arc<Logger> {
        if let Some(logger) = self.loggers.read().get(name) {
            return Arc::clone(logger);
        }

        let mut loggers = self.loggers.write();
        // Another thread may have inserted between the two locks
        let logger = loggers.entry(name.to_string()).or_insert_with(|| {
            self.dispatcher.metrics().record_logger_created();
            Arc::new(Logger::new(name, Arc::clone(&self.dispatcher)))
        });
        Arc::clone(logger)
    }

    /// Logger keyed by the short type name of `T`
    pub fn logger_for<T: ?Sized>(&self) -> Arc<Logger> {
        self.get(short_type_name::<T>())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.loggers.read().contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.loggers.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.read().is_empty()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.read().keys().cloned().collect();
        names.sort();
        names
    }

    pub fn root_level(&self) -> LogLevel {
        self.dispatcher.root_level()
    }

    pub fn set_root_level(&self, level: LogLevel) {
        self.dispatcher.set_root_level(level);
    }

    pub fn add_appender(&self, appender: Box<dyn Appender>) {
        self.dispatcher.add_appender(appender);
    }

    /// Apply `config`: root level, a single console appender replacing any
    /// existing ones, and the quiet level on each configured noisy logger.
    pub fn configure(&self, config: &LoggingConfig) -> Result<()> {
        config.validate()?;

        self.dispatcher.set_root_level(config.level);
        self.dispatcher
            .replace_appenders(vec![Box::new(ConsoleAppender::from_config(config))]);

        for name in &config.quiet_loggers {
            self.get(name).set_level(Some(config.quiet_level));
        }
        Ok(())
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    pub fn context(&self) -> &LoggerContext {
        self.dispatcher.context()
    }

    pub fn metrics(&self) -> &LoggerMetrics {
        self.dispatcher.metrics()
    }

    pub fn flush(&self) -> Result<()> {
        self.dispatcher.flush()
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("loggers", &self.names())
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}

/// Builder for [`LoggerRegistry`]
///
/// # Example
///
/// ```
/// use logger_registry::{LogLevel, LoggerRegistry};
/// use logger_registry::appenders::MemoryAppender;
///
/// let sink = MemoryAppender::new();
/// let captured = sink.handle();
///
/// let registry = LoggerRegistry::builder()
///     .min_level(LogLevel::Debug)
///     .appender(sink)
///     .context_field("service", "checkout")
///     .level("hyper", LogLevel::Warn)
///     .build();
///
/// registry.get("CartService").debug("loaded");
/// registry.get("hyper::client").info("connected");
/// assert_eq!(captured.messages(), vec!["loaded"]);
/// ```
pub struct RegistryBuilder {
    min_level: LogLevel,
    appenders: Vec<Box<dyn Appender>>,
    context: Vec<(String, FieldValue)>,
    levels: Vec<(String, LogLevel)>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            min_level: LogLevel::Info,
            appenders: Vec::new(),
            context: Vec::new(),
            levels: Vec::new(),
        }
    }

    /// Root level for loggers without an explicit level
    #[must_use]
    pub fn min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    #[must_use]
    pub fn appender<A: Appender + 'static>(mut self, appender: A) -> Self {
        self.appenders.push(Box::new(appender));
        self
    }

    /// Ambient field attached to every entry
    #[must_use]
    pub fn context_field<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<FieldValue>,
    {
        self.context.push((key.into(), value.into()));
        self
    }

    /// Explicit level for `name` and its descendants
    #[must_use]
    pub fn level(mut self, name: impl Into<String>, level: LogLevel) -> Self {
        self.levels.push((name.into(), level));
        self
    }

    pub fn build(self) -> LoggerRegistry {
        let dispatcher = Dispatcher::new();
        dispatcher.set_root_level(self.min_level);
        for appender in self.appenders {
            dispatcher.add_appender(appender);
        }
        for (key, value) in self.context {
            dispatcher.context().set(key, value);
        }
        for (name, level) in self.levels {
            dispatcher.set_level_for(&name, Some(level));
        }
        LoggerRegistry::with_dispatcher(Arc::new(dispatcher))
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}
