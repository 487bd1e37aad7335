//! Global logging module for the truth-table importer
//!
//! Provides a thread-safe global logger, a per-thread file context that tags
//! every event with the file being imported, and the macro support functions.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use crate::utils::CellLocation;
use std::cell::RefCell;
use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{ConsoleLogger, Logger, LoggingService, MemoryLogger, StructuredLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

thread_local! {
    static FILE_CONTEXT: RefCell<Option<FileContext>> = const { RefCell::new(None) };
}

/// The file currently being imported on this thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileContext {
    pub file_path: PathBuf,
}

/// Initialize global logging system
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| format!("Configuration validation failed: {}", e))?;

    let logging_service = Arc::new(service::create_configured_service());

    GLOBAL_LOGGER
        .set(logging_service.clone())
        .map_err(|_| "Global logger already initialized".to_string())?;

    let sample_codes = ["ERR001", "E005", "E040", "E060", "E081"];
    for &code in &sample_codes {
        if codes::get_description(code) == "Unknown error" {
            return Err(format!("Missing metadata for error code: {}", code));
        }
    }

    logging_service.log_event(LogEvent::success(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Global logging system initialized",
    ));

    Ok(())
}

/// Initialize with custom service (primarily for testing)
pub fn init_global_logging_with_service(service: Arc<LoggingService>) -> Result<(), String> {
    GLOBAL_LOGGER
        .set(service)
        .map_err(|_| "Global logger already initialized".to_string())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

/// Safe access to global logger
pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// Set file context for current thread
pub fn set_file_context(file_path: PathBuf) {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = Some(FileContext { file_path });
    });
}

/// Clear file context for current thread
pub fn clear_file_context() {
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = None;
    });
}

/// Execute function with file context
pub fn with_file_context<F, R>(file_path: PathBuf, f: F) -> R
where
    F: FnOnce() -> R,
{
    let previous = get_current_file_context();
    set_file_context(file_path);
    let result = f();
    FILE_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = previous;
    });
    result
}

/// Get current file context (used by macros)
pub fn get_current_file_context() -> Option<FileContext> {
    FILE_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Tag an event with the current file and hand it to the global logger
pub fn dispatch_event(event: LogEvent) {
    let event = match get_current_file_context() {
        Some(file_ctx) => event.with_context("file", &file_ctx.file_path.display().to_string()),
        None => event,
    };

    if let Some(logger) = try_get_global_logger() {
        logger.log_event(event);
    }
}

fn with_pairs(mut event: LogEvent, context: Vec<(&str, &str)>) -> LogEvent {
    for (key, value) in context {
        event = event.with_context(key, value);
    }
    event
}

/// Log error with context (used by log_error! macro)
pub fn log_error_with_context(
    code: Code,
    message: &str,
    location: Option<CellLocation>,
    context: Vec<(&str, &str)>,
) {
    let mut event = with_pairs(LogEvent::error(code, message), context);
    if let Some(location) = location {
        event = event.with_location(location);
    }
    dispatch_event(event);
}

/// Log success with context (used by log_success! macro)
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, &str)>) {
    dispatch_event(with_pairs(LogEvent::success(code, message), context));
}

/// Log info with context (used by log_info! macro)
pub fn log_info_with_context(message: &str, context: Vec<(&str, &str)>) {
    dispatch_event(with_pairs(LogEvent::info(message), context));
}

/// Log warning with context (used by log_warning! macro)
pub fn log_warning_with_context(code: Option<Code>, message: &str, context: Vec<(&str, &str)>) {
    let event = match code {
        Some(code) => LogEvent::warning_with_code(code, message),
        None => LogEvent::warning(message),
    };
    dispatch_event(with_pairs(event, context));
}

/// Safe error logging (won't panic if uninitialized)
pub fn safe_log_error(code: Code, message: &str) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(LogEvent::error(code, message));
    } else {
        eprintln!("[ERROR] FALLBACK: [{}] {}", code.as_str(), message);
    }
}

/// Get system diagnostics
pub fn get_system_diagnostics() -> String {
    let mut diagnostics = String::new();
    diagnostics.push_str("=== Logging System Diagnostics ===\n");
    diagnostics.push_str(&format!("Initialized: {}\n", is_initialized()));
    diagnostics.push_str(&format!(
        "Build configuration: {}\n\n",
        crate::config::build_info::source_info()
    ));
    diagnostics.push_str(&config::get_config_summary());
    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_context_management() {
        let file_path = PathBuf::from("adder.csv");

        assert!(get_current_file_context().is_none());

        set_file_context(file_path.clone());
        assert_eq!(
            get_current_file_context().map(|c| c.file_path),
            Some(file_path)
        );

        clear_file_context();
        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_with_file_context_restores_previous() {
        let outer = PathBuf::from("outer.csv");
        let inner = PathBuf::from("inner.csv");

        let result = with_file_context(outer.clone(), || {
            let nested = with_file_context(inner.clone(), || {
                assert_eq!(get_current_file_context().unwrap().file_path, inner);
                7
            });
            assert_eq!(get_current_file_context().unwrap().file_path, outer);
            nested * 6
        });

        assert_eq!(result, 42);
        assert!(get_current_file_context().is_none());
    }

    #[test]
    fn test_safe_logging() {
        safe_log_error(codes::system::INTERNAL_ERROR, "Test error");
    }

    #[test]
    fn test_diagnostics() {
        let diagnostics = get_system_diagnostics();
        assert!(diagnostics.contains("Logging System Diagnostics"));
        assert!(diagnostics.contains("Initialized:"));
        assert!(diagnostics.contains("Build configuration"));
    }
}
