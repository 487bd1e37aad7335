//! Logging service and logger backends

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use crate::utils::CellLocation;
use std::sync::{Arc, Mutex, MutexGuard};

/// Simple logger trait
pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Main logging service with configuration awareness
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    /// Create service with an explicit logger and minimum level
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Create service with configuration-aware settings
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let logger: Arc<dyn Logger> = if !config::use_console_logging() {
            Arc::new(SilentLogger)
        } else if config::use_structured_logging() {
            Arc::new(StructuredLogger::new(min_level))
        } else {
            Arc::new(ConsoleLogger::new(min_level))
        };

        Self::new(logger, min_level)
    }

    /// Change the minimum level at runtime
    pub fn set_min_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    /// Check if a level passes the minimum
    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    /// Log a prepared event if its level passes
    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }

    /// Log error with code
    pub fn log_error(&self, error_code: Code, message: &str) {
        self.log_event(LogEvent::error(error_code, message));
    }

    /// Log error with code at a cell location
    pub fn log_error_at(&self, error_code: Code, message: &str, location: CellLocation) {
        self.log_event(LogEvent::error(error_code, message).with_location(location));
    }

    /// Log success with code
    pub fn log_success(&self, success_code: Code, message: &str) {
        self.log_event(LogEvent::success(success_code, message));
    }

    /// Log warning message
    pub fn log_warning(&self, message: &str) {
        self.log_event(LogEvent::warning(message));
    }

    /// Log info message
    pub fn log_info(&self, message: &str) {
        self.log_event(LogEvent::info(message));
    }

    /// Log debug message
    pub fn log_debug(&self, message: &str) {
        self.log_event(LogEvent::debug(message));
    }
}

/// Logger used when console output is disabled
pub struct SilentLogger;

impl Logger for SilentLogger {
    fn log(&self, _event: &LogEvent) {}
}

/// Plain text logger writing to stdout/stderr
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    /// Create console logger with minimum level
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            // stdout is reserved for command output
            eprintln!("{}", event.format());
        }
    }
}

/// JSON-lines logger
pub struct StructuredLogger {
    min_level: LogLevel,
}

impl StructuredLogger {
    /// Create JSON-lines logger with minimum level
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }
}

impl Logger for StructuredLogger {
    fn log(&self, event: &LogEvent) {
        if event.level <= self.min_level {
            match event.format_json() {
                Ok(json) => eprintln!("{}", json),
                Err(_) => eprintln!("{}", event.format()),
            }
        }
    }
}

/// Memory logger for testing
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    /// Create empty memory logger
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    // A poisoned lock still holds a usable event list
    fn events(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all logged events
    pub fn get_events(&self) -> Vec<LogEvent> {
        self.events().clone()
    }

    /// Clear all events
    pub fn clear(&self) {
        self.events().clear();
    }

    /// Get event count
    pub fn event_count(&self) -> usize {
        self.events().len()
    }

    /// Get only error events
    pub fn get_errors(&self) -> Vec<LogEvent> {
        self.events()
            .iter()
            .filter(|e| e.is_error())
            .cloned()
            .collect()
    }

    /// Get only warning events
    pub fn get_warnings(&self) -> Vec<LogEvent> {
        self.events()
            .iter()
            .filter(|e| e.is_warning())
            .cloned()
            .collect()
    }

    /// Get events carrying a specific code
    pub fn get_events_with_code(&self, code: Code) -> Vec<LogEvent> {
        self.events()
            .iter()
            .filter(|e| e.code == code)
            .cloned()
            .collect()
    }

    /// Check if an error with the code was logged
    pub fn has_error_with_code(&self, code: Code) -> bool {
        self.events()
            .iter()
            .any(|e| e.is_error() && e.code == code)
    }

    /// Check if a success with the code was logged
    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.events()
            .iter()
            .any(|e| e.is_info() && e.code == code)
    }

    /// Get events whose code belongs to a category
    pub fn get_events_by_category(&self, category: &str) -> Vec<LogEvent> {
        self.events()
            .iter()
            .filter(|e| e.category() == category)
            .cloned()
            .collect()
    }

    /// Count events per level
    pub fn get_summary(&self) -> EventSummary {
        let events = self.events();
        EventSummary {
            total_count: events.len(),
            error_count: events.iter().filter(|e| e.is_error()).count(),
            warning_count: events.iter().filter(|e| e.is_warning()).count(),
            info_count: events.iter().filter(|e| e.is_info()).count(),
            debug_count: events.iter().filter(|e| e.is_debug()).count(),
        }
    }
}

impl Default for MemoryLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        self.events().push(event.clone());
    }
}

/// Summary of events in memory logger
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventSummary {
    pub total_count: usize,
    pub error_count: usize,
    pub warning_count: usize,
    pub info_count: usize,
    pub debug_count: usize,
}

impl EventSummary {
    /// Check if any errors were logged
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Check if any warnings were logged
    pub fn has_warnings(&self) -> bool {
        self.warning_count > 0
    }
}

/// Create logging service based on current configuration
pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_console_logger() {
        let logger = ConsoleLogger::new(LogLevel::Info);
        logger.log(&LogEvent::info("Test message"));
    }

    #[test]
    fn test_structured_logger() {
        let logger = StructuredLogger::new(LogLevel::Debug);
        let event = LogEvent::error(codes::file_processing::FILE_NOT_FOUND, "Test error")
            .with_context("key", "value");
        logger.log(&event);
    }

    #[test]
    fn test_memory_logger() {
        let logger = MemoryLogger::new();

        logger.log(&LogEvent::info("Message 1"));
        logger.log(&LogEvent::error(codes::header::NO_INPUTS, "Error message"));
        logger.log(&LogEvent::warning_with_code(
            codes::lexical::UNTERMINATED_QUOTE,
            "Unterminated quote",
        ));

        assert_eq!(logger.event_count(), 3);
        assert_eq!(logger.get_errors().len(), 1);
        assert_eq!(logger.get_warnings().len(), 1);
        assert!(logger.has_error_with_code(codes::header::NO_INPUTS));
        assert_eq!(logger.get_events_by_category("Header").len(), 1);

        let summary = logger.get_summary();
        assert_eq!(summary.total_count, 3);
        assert!(summary.has_errors());
        assert!(summary.has_warnings());
        assert_eq!(summary.info_count, 1);

        logger.clear();
        assert_eq!(logger.event_count(), 0);
    }

    #[test]
    fn test_logging_service() {
        let logger = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(logger.clone(), LogLevel::Debug);

        service.log_error(codes::file_processing::PERMISSION_DENIED, "Test error");
        service.log_error_at(
            codes::rows::INVALID_ENTRY,
            "Bad entry",
            CellLocation::new(4, 2),
        );
        service.log_success(codes::success::TABLE_INSTALLED, "Installed");
        service.log_info("Test info");

        assert_eq!(logger.event_count(), 4);
        assert!(logger.has_error_with_code(codes::file_processing::PERMISSION_DENIED));
        assert!(logger.has_success_with_code(codes::success::TABLE_INSTALLED));
        let located = logger.get_events_with_code(codes::rows::INVALID_ENTRY);
        assert_eq!(located[0].location, Some(CellLocation::new(4, 2)));
    }

    #[test]
    fn test_log_level_filtering() {
        let logger = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(logger.clone(), LogLevel::Error);

        service.log_debug("Debug message");
        service.log_info("Info message");
        service.log_warning("Warning message");
        service.log_error(codes::system::INTERNAL_ERROR, "Error message");

        assert_eq!(logger.event_count(), 1);
        assert!(logger.has_error_with_code(codes::system::INTERNAL_ERROR));
    }
}
