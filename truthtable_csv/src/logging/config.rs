//! Logging configuration: compile-time floors plus runtime preferences
//!
//! The verbosity floor comes from the build profile and cannot be lowered at
//! runtime; everything else is a user preference installed once at startup.

use crate::config::compile_time::logging::*;
use crate::config::runtime::LoggingPreferences;
use std::sync::OnceLock;

type EventsLogLevel = crate::logging::events::LogLevel;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())
}

/// Get runtime preferences (with fallback to defaults)
fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Level floor that runtime preferences cannot go below
pub fn get_security_log_level() -> EventsLogLevel {
    match SECURITY_MIN_LOG_LEVEL {
        0 => EventsLogLevel::Error,
        1 => EventsLogLevel::Warning,
        2 => EventsLogLevel::Info,
        _ => EventsLogLevel::Debug,
    }
}

/// Get minimum log level (user preference, never quieter than the floor)
pub fn get_min_log_level() -> EventsLogLevel {
    let user_level = get_runtime_preferences().min_log_level.to_events_log_level();
    user_level.max(get_security_log_level())
}

/// Check if structured logging is enabled
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Check if console logging is enabled
pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Maximum stored length of a log message
pub fn get_max_message_length() -> usize {
    MAX_LOG_MESSAGE_LENGTH
}

/// Sanity checks run before the global logger is installed
pub fn validate_config() -> Result<(), String> {
    if MAX_LOG_MESSAGE_LENGTH < 64 {
        return Err(format!(
            "max_log_message_length of {} is too small to hold diagnostics",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }
    Ok(())
}

/// Human-readable summary of the effective logging configuration
pub fn get_config_summary() -> String {
    format!(
        "Logging Configuration:\n  min level: {}\n  floor: {}\n  structured: {}\n  console: {}\n  max message length: {}\n",
        get_min_log_level().as_str(),
        get_security_log_level().as_str(),
        use_structured_logging(),
        use_console_logging(),
        MAX_LOG_MESSAGE_LENGTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_min_level_respects_floor() {
        assert!(get_min_log_level() >= get_security_log_level());
    }

    #[test]
    fn test_validate_config() {
        assert!(validate_config().is_ok());
    }

    #[test]
    fn test_config_summary() {
        let summary = get_config_summary();
        assert!(summary.contains("Logging Configuration"));
        assert!(summary.contains("max message length"));
    }
}
