//! # Logger Registry
//!
//! Name-keyed loggers with per-type access.
//!
//! ## Features
//!
//! - **One handle per name**: `LoggerRegistry::get` returns the same `Arc<Logger>` for a name
//! - **Per-type loggers**: implement `HasLogger` to get a logger named after the type
//! - **Hierarchical levels**: `hyper::client` inherits the level set on `hyper`
//! - **Context enrichment**: `ContextualLogger` and scoped ambient fields
//! - **Thread Safe**: lookups, level changes and logging are safe across threads

pub mod appenders;
pub mod core;
pub mod macros;

pub mod prelude {
    pub use crate::appenders::{ConsoleAppender, MemoryAppender, MemoryHandle};
    pub use crate::core::{
        Appender, ContextGuard, ContextualLogger, FieldValue, HasLogger, LogContext, LogEntry,
        LogLevel, Logger, LoggerContext, LoggerError, LoggerMetrics, LoggerRegistry,
        LoggingConfig, OutputFormat, RegistryBuilder, Result, TimestampFormat,
    };
}

pub use crate::appenders::{ConsoleAppender, MemoryAppender, MemoryHandle};
pub use crate::core::{
    short_type_name, Appender, ContextGuard, ContextualLogger, Dispatcher, FieldValue, HasLogger,
    LogContext, LogEntry, LogLevel, Logger, LoggerContext, LoggerError, LoggerMetrics,
    LoggerRegistry, LoggingConfig, OutputFormat, RegistryBuilder, Result, TimestampFormat,
    DEFAULT_QUIET_LOGGERS, STANDARD_DATE_FORMAT,
};
