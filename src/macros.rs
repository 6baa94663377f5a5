//! Logging macros with `format!`-style arguments.
//!
//! They accept anything with a `log(LogLevel, impl Into<String>)` method:
//! `Logger`, `Arc<Logger>` and `ContextualLogger`.
//!
//! # Examples
//!
//! ```
//! use logger_registry::prelude::*;
//! use logger_registry::info;
//!
//! let registry = LoggerRegistry::new();
//! let logger = registry.get("Server");
//!
//! let port = 8080;
//! info!(logger, "Server listening on port {}", port);
//! ```

/// Log a message at an explicit level.
///
/// ```
/// # use logger_registry::prelude::*;
/// # let logger = LoggerRegistry::new().get("jobs");
/// use logger_registry::log;
/// log!(logger, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, format!($($arg)+))
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Trace, $($arg)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Debug, $($arg)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Warn, $($arg)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! fatal {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::LogLevel::Fatal, $($arg)+)
    };
}

/// Logger named after the calling module's path.
///
/// ```
/// use logger_registry::{module_logger, LoggerRegistry};
///
/// let registry = LoggerRegistry::new();
/// let logger = module_logger!(registry);
/// assert_eq!(logger.name(), module_path!());
/// ```
#[macro_export]
macro_rules! module_logger {
    ($registry:expr) => {
        $registry.get(module_path!())
    };
}
