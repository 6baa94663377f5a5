//! Per-type logger access
//!
//! Implement [`HasLogger`] on a type to give every instance a logger named
//! after the concrete type:
//!
//! ```
//! use logger_registry::{HasLogger, LoggerRegistry};
//! use std::sync::Arc;
//!
//! struct PaymentService {
//!     registry: Arc<LoggerRegistry>,
//! }
//!
//! impl HasLogger for PaymentService {
//!     fn logger_registry(&self) -> &LoggerRegistry {
//!         &self.registry
//!     }
//! }
//!
//! let registry = Arc::new(LoggerRegistry::new());
//! let service = PaymentService { registry: Arc::clone(&registry) };
//!
//! service.logger().info("Processing payment");
//! assert!(Arc::ptr_eq(&service.logger(), &registry.get("PaymentService")));
//! ```

use super::{
    contextual::ContextualLogger, log_context::LogContext, logger::Logger,
    registry::LoggerRegistry,
};
use std::sync::Arc;

pub trait HasLogger {
    /// Registry the logger is looked up in
    fn logger_registry(&self) -> &LoggerRegistry;

    /// Name of the implementing type without module path or generic arguments
    fn logger_name(&self) -> &'static str {
        short_type_name::<Self>()
    }

    /// Look up this type's logger.
    ///
    /// Nothing is cached on `self`: every call goes back to the registry, so
    /// level changes and registry configuration apply to all call sites.
    fn logger(&self) -> Arc<Logger> {
        self.logger_registry().get(self.logger_name())
    }

    /// This type's logger, decorated with `context` on every entry
    fn logger_with(&self, context: LogContext) -> ContextualLogger {
        ContextualLogger::new(self.logger(), context)
    }
}

/// Last path segment of `T`'s type name, generic arguments dropped.
///
/// `billing::PaymentService` becomes `PaymentService`,
/// `cache::Store<billing::Invoice>` becomes `Store`.
///
/// Meant for nominal types. References, pointers, slices, arrays and
/// trait objects are named after the type they wrap; tuples after their
/// first element.
pub fn short_type_name<T: ?Sized>() -> &'static str {
    strip_type_path(std::any::type_name::<T>())
}

const WRAPPER_PREFIXES: &[&str] = &["&", "mut ", "*const ", "*mut ", "dyn ", "impl ", "(", "["];

fn strip_type_path(full: &str) -> &str {
    let mut rest = full;
    while let Some(inner) = WRAPPER_PREFIXES
        .iter()
        .find_map(|prefix| rest.strip_prefix(prefix))
    {
        rest = inner;
    }

    let end = rest
        .find(|c: char| !(c.is_alphanumeric() || c == '_' || c == ':'))
        .unwrap_or(rest.len());
    match rest[..end].rsplit("::").next() {
        Some(name) if !name.is_empty() => name,
        _ => full,
    }
}
