//! Core logger types and traits

pub mod accessor;
pub mod appender;
pub mod config;
pub mod contextual;
pub mod dispatcher;
pub mod error;
pub mod log_context;
pub mod log_entry;
pub mod log_level;
pub mod logger;
pub mod metrics;
pub mod output_format;
pub mod registry;
pub mod timestamp;

pub use accessor::{short_type_name, HasLogger};
pub use appender::Appender;
pub use config::{LoggingConfig, DEFAULT_QUIET_LOGGERS};
pub use contextual::ContextualLogger;
pub use dispatcher::Dispatcher;
pub use error::{LoggerError, Result};
pub use log_context::{ContextGuard, FieldValue, LogContext, LoggerContext};
pub use log_entry::LogEntry;
pub use log_level::LogLevel;
pub use logger::Logger;
pub use metrics::LoggerMetrics;
pub use output_format::OutputFormat;
pub use registry::{LoggerRegistry, RegistryBuilder};
pub use timestamp::{TimestampFormat, STANDARD_DATE_FORMAT};
