//! Unit tests for log.rs
//!
//! Tests Logger trait, LogEntry, LogSeverity, DefaultLogger, and the global
//! logger slot.

use crate::log::{self, DefaultLogger, LogEntry, LogSeverity, Logger};
use serial_test::serial;
use std::sync::{Arc, Mutex};
use std::time::SystemTime;

// ============================================================================
// LOG SEVERITY TESTS
// ============================================================================

#[test]
fn test_log_severity_ordering() {
    // Test PartialOrd implementation
    assert!(LogSeverity::Trace < LogSeverity::Debug);
    assert!(LogSeverity::Debug < LogSeverity::Info);
    assert!(LogSeverity::Info < LogSeverity::Warn);
    assert!(LogSeverity::Warn < LogSeverity::Error);
}

#[test]
fn test_log_severity_equality() {
    assert_eq!(LogSeverity::Trace, LogSeverity::Trace);
    assert_eq!(LogSeverity::Error, LogSeverity::Error);
    assert_ne!(LogSeverity::Trace, LogSeverity::Debug);
    assert_ne!(LogSeverity::Info, LogSeverity::Error);
}

#[test]
fn test_log_severity_copy() {
    let sev1 = LogSeverity::Info;
    let sev2 = sev1; // Copy, not move
    assert_eq!(sev1, sev2);
    assert_eq!(sev1, LogSeverity::Info);
}

#[test]
fn test_log_severity_debug() {
    assert_eq!(format!("{:?}", LogSeverity::Trace), "Trace");
    assert_eq!(format!("{:?}", LogSeverity::Warn), "Warn");
    assert_eq!(format!("{:?}", LogSeverity::Error), "Error");
}

// ============================================================================
// LOG ENTRY TESTS
// ============================================================================

#[test]
fn test_log_entry_creation_without_file_line() {
    let entry = LogEntry {
        severity: LogSeverity::Info,
        timestamp: SystemTime::now(),
        source: "override::engine".to_string(),
        message: "Swapchain resolution override enabled".to_string(),
        file: None,
        line: None,
    };

    assert_eq!(entry.severity, LogSeverity::Info);
    assert_eq!(entry.source, "override::engine");
    assert_eq!(entry.message, "Swapchain resolution override enabled");
    assert!(entry.file.is_none());
    assert!(entry.line.is_none());
}

#[test]
fn test_log_entry_creation_with_file_line() {
    let entry = LogEntry {
        severity: LogSeverity::Error,
        timestamp: SystemTime::now(),
        source: "override::registry".to_string(),
        message: "Proxy texture creation failed".to_string(),
        file: Some("src/proxy/resource_set.rs"),
        line: Some(42),
    };

    assert_eq!(entry.severity, LogSeverity::Error);
    assert_eq!(entry.file, Some("src/proxy/resource_set.rs"));
    assert_eq!(entry.line, Some(42));
}

#[test]
fn test_log_entry_clone() {
    let entry1 = LogEntry {
        severity: LogSeverity::Warn,
        timestamp: SystemTime::now(),
        source: "override::config".to_string(),
        message: "Malformed resolution".to_string(),
        file: None,
        line: None,
    };
    let entry2 = entry1.clone();

    assert_eq!(entry1.severity, entry2.severity);
    assert_eq!(entry1.source, entry2.source);
    assert_eq!(entry1.message, entry2.message);
}

// ============================================================================
// DEFAULT LOGGER TESTS
// ============================================================================

#[test]
fn test_default_logger_does_not_panic() {
    let logger = DefaultLogger;

    logger.log(&LogEntry {
        severity: LogSeverity::Info,
        timestamp: SystemTime::now(),
        source: "override::test".to_string(),
        message: "info message".to_string(),
        file: None,
        line: None,
    });

    logger.log(&LogEntry {
        severity: LogSeverity::Error,
        timestamp: SystemTime::now(),
        source: "override::test".to_string(),
        message: "error message".to_string(),
        file: Some("src/log_tests.rs"),
        line: Some(1),
    });
}

// ============================================================================
// GLOBAL LOGGER TESTS
// ============================================================================

/// Test logger that captures entries into a shared vector
struct CaptureLogger {
    entries: Arc<Mutex<Vec<LogEntry>>>,
}

impl Logger for CaptureLogger {
    fn log(&self, entry: &LogEntry) {
        self.entries.lock().unwrap().push(entry.clone());
    }
}

#[test]
#[serial]
fn test_set_logger_replaces_global_logger() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    log::set_logger(Box::new(CaptureLogger {
        entries: entries.clone(),
    }));

    log::log(
        LogSeverity::Info,
        "override::test",
        "captured message".to_string(),
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].severity, LogSeverity::Info);
        assert_eq!(captured[0].source, "override::test");
        assert_eq!(captured[0].message, "captured message");
        assert!(captured[0].file.is_none());
    }

    // Restore the default logger for other tests
    log::set_logger(Box::new(DefaultLogger));
}

#[test]
#[serial]
fn test_log_detailed_carries_file_and_line() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    log::set_logger(Box::new(CaptureLogger {
        entries: entries.clone(),
    }));

    log::log_detailed(
        LogSeverity::Error,
        "override::test",
        "detailed error".to_string(),
        "src/some_module.rs",
        123,
    );

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].file, Some("src/some_module.rs"));
        assert_eq!(captured[0].line, Some(123));
    }

    log::set_logger(Box::new(DefaultLogger));
}

#[test]
#[serial]
fn test_logging_macros_route_through_global_logger() {
    let entries = Arc::new(Mutex::new(Vec::new()));
    log::set_logger(Box::new(CaptureLogger {
        entries: entries.clone(),
    }));

    crate::engine_trace!("override::test", "trace {}", 1);
    crate::engine_debug!("override::test", "debug {}", 2);
    crate::engine_info!("override::test", "info {}", 3);
    crate::engine_warn!("override::test", "warn {}", 4);
    crate::engine_error!("override::test", "error {}", 5);

    {
        let captured = entries.lock().unwrap();
        assert_eq!(captured.len(), 5);
        assert_eq!(captured[0].severity, LogSeverity::Trace);
        assert_eq!(captured[1].severity, LogSeverity::Debug);
        assert_eq!(captured[2].severity, LogSeverity::Info);
        assert_eq!(captured[3].severity, LogSeverity::Warn);
        assert_eq!(captured[4].severity, LogSeverity::Error);
        assert_eq!(captured[4].message, "error 5");
        // Only the error macro records file:line
        assert!(captured[3].file.is_none());
        assert!(captured[4].file.is_some());
        assert!(captured[4].line.is_some());
    }

    log::set_logger(Box::new(DefaultLogger));
}
