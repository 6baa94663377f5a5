//! Integration tests for the logger registry
//!
//! These tests verify:
//! - One handle per name, distinct handles per distinct name
//! - Per-type access through `HasLogger`
//! - Accessor logging is indistinguishable from direct lookups
//! - Root configuration and hierarchical levels
//! - Context enrichment, both per-logger and ambient

use logger_registry::appenders::{Appender, MemoryAppender, MemoryHandle};
use logger_registry::core::log_entry::LogEntry;
use logger_registry::{
    module_logger, HasLogger, LogContext, LogLevel, LoggerError, LoggerRegistry, LoggingConfig,
    Result,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

struct PaymentService {
    registry: Arc<LoggerRegistry>,
}

impl HasLogger for PaymentService {
    fn logger_registry(&self) -> &LoggerRegistry {
        &self.registry
    }
}

impl PaymentService {
    fn charge(&self, amount: u32) {
        self.logger().info("Processing payment");
        self.logger_with(LogContext::new().with_field("amount", amount))
            .debug("charge submitted");
    }
}

struct InventoryService {
    registry: Arc<LoggerRegistry>,
}

impl HasLogger for InventoryService {
    fn logger_registry(&self) -> &LoggerRegistry {
        &self.registry
    }
}

fn registry_with_memory() -> (Arc<LoggerRegistry>, MemoryHandle) {
    let sink = MemoryAppender::new();
    let handle = sink.handle();
    let registry = LoggerRegistry::builder()
        .min_level(LogLevel::Trace)
        .appender(sink)
        .build();
    (Arc::new(registry), handle)
}

#[test]
fn test_same_name_returns_same_handle() {
    let (registry, handle) = registry_with_memory();

    let first = registry.get("orders");
    let second = registry.get("orders");
    assert!(Arc::ptr_eq(&first, &second));

    first.info("via first");
    second.info("via second");
    assert_eq!(handle.entries_for("orders").len(), 2);
}

#[test]
fn test_payment_service_instances_share_logger() {
    let (registry, _handle) = registry_with_memory();

    let instance1 = PaymentService {
        registry: Arc::clone(&registry),
    };
    let instance2 = PaymentService {
        registry: Arc::clone(&registry),
    };
    let inventory = InventoryService {
        registry: Arc::clone(&registry),
    };

    let expected = registry.get("PaymentService");
    assert!(Arc::ptr_eq(&instance1.logger(), &expected));
    assert!(Arc::ptr_eq(&instance2.logger(), &expected));
    assert!(!Arc::ptr_eq(&instance1.logger(), &registry.get("InventoryService")));
    assert!(Arc::ptr_eq(&inventory.logger(), &registry.get("InventoryService")));
    assert_eq!(inventory.logger_name(), "InventoryService");
}

#[test]
fn test_accessor_logging_matches_direct_logging() {
    let (registry, handle) = registry_with_memory();
    let service = PaymentService {
        registry: Arc::clone(&registry),
    };

    service.logger().info("Processing payment");
    registry.get("PaymentService").info("Processing payment");

    let entries = handle.entries();
    assert_eq!(entries.len(), 2);
    for entry in &entries {
        assert_eq!(entry.logger, "PaymentService");
        assert_eq!(entry.level, LogLevel::Info);
        assert_eq!(entry.message, "Processing payment");
        assert!(entry.context.is_none());
    }
}

#[test]
fn test_level_changes_reach_accessor_call_sites() {
    let (registry, handle) = registry_with_memory();
    let service = PaymentService {
        registry: Arc::clone(&registry),
    };

    service.charge(42);
    assert_eq!(handle.len(), 2);
    assert_eq!(handle.entries()[1].field("amount").as_deref(), Some("42"));

    registry.get("PaymentService").set_level(Some(LogLevel::Warn));
    service.charge(7);
    assert_eq!(handle.len(), 2, "no call site needed to change");
}

#[test]
fn test_configure_quiets_noisy_loggers() {
    let registry = LoggerRegistry::new();
    let config = LoggingConfig::default()
        .with_level_name("DEBUG")
        .with_quiet_logger("sqlx");
    registry.configure(&config).expect("valid config");

    // configure() installs a console appender; swap in memory to observe output
    let sink = MemoryAppender::new();
    let handle = sink.handle();
    registry.dispatcher().replace_appenders(vec![Box::new(sink)]);

    registry.get("hyper::client::pool").info("connection reused");
    registry.get("sqlx::query").debug("SELECT 1");
    registry.get("reqwest").warn("retrying request");
    registry.get("app::routes::health").debug("Readiness check requested");

    assert_eq!(
        handle.messages(),
        vec!["retrying request", "Readiness check requested"]
    );
    assert!(registry.metrics().filtered_count() >= 2);
}

#[test]
fn test_module_logger_and_type_logger_are_independent() {
    let (registry, _handle) = registry_with_memory();
    let module = module_logger!(registry);
    let typed = registry.logger_for::<PaymentService>();

    assert_eq!(module.name(), "integration_tests");
    assert_eq!(typed.name(), "PaymentService");
    assert!(!Arc::ptr_eq(&module, &typed));
}

#[test]
fn test_ambient_context_scoped_to_request() {
    let (registry, handle) = registry_with_memory();
    let service = PaymentService {
        registry: Arc::clone(&registry),
    };

    {
        let _request = registry.context().scoped("request_id", "req-1001");
        service.logger().info("inside request");
    }
    service.logger().info("outside request");

    let entries = handle.entries();
    assert_eq!(entries[0].field("request_id").as_deref(), Some("req-1001"));
    assert_eq!(entries[1].field("request_id"), None);
}

#[test]
fn test_log_injection_prevention() {
    let (registry, handle) = registry_with_memory();
    registry
        .get("auth")
        .info("User login\nERROR [2024-10-17] Fake error injected");

    let entries = handle.entries();
    assert_eq!(entries.len(), 1);
    assert!(!entries[0].message.contains('\n'));
    assert!(entries[0].message.contains("\\n"));
}

#[test]
fn test_failing_appender_does_not_block_others() {
    struct FailingAppender {
        attempts: Arc<AtomicUsize>,
    }

    impl Appender for FailingAppender {
        fn append(&mut self, _entry: &LogEntry) -> Result<()> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(LoggerError::appender("failing", "disk full"))
        }

        fn flush(&mut self) -> Result<()> {
            Err(LoggerError::appender("failing", "disk full"))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    let attempts = Arc::new(AtomicUsize::new(0));
    let sink = MemoryAppender::new();
    let handle = sink.handle();
    let registry = LoggerRegistry::builder()
        .appender(FailingAppender {
            attempts: Arc::clone(&attempts),
        })
        .appender(sink)
        .build();

    let logger = registry.get("billing");
    logger.info("first");
    logger.info("second");

    assert_eq!(attempts.load(Ordering::SeqCst), 2);
    assert_eq!(handle.messages(), vec!["first", "second"]);
    assert_eq!(registry.metrics().dropped_count(), 2);
    assert!(logger.flush().is_err());
}
