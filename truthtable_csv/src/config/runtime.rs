// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Errors raised while loading or validating runtime configuration
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read configuration file {path}: {message}")]
    Read { path: String, message: String },

    #[error("Invalid configuration TOML: {message}")]
    Parse { message: String },

    #[error("Separator and quote character must differ (both are {character:?})")]
    SeparatorEqualsQuote { character: char },

    #[error("Line terminators cannot be used as {role} character")]
    LineTerminator { role: &'static str },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportPreferences {
    /// Character separating cells on a line
    pub separator: char,

    /// Character opening and closing quoted cells
    pub quote: char,

    /// Whether to refuse files without a .csv extension
    pub require_csv_extension: bool,

    /// Whether to emit per-row debug statistics during validation
    pub log_row_statistics: bool,
}

impl Default for ImportPreferences {
    fn default() -> Self {
        Self {
            separator: env::var(env_vars::SEPARATOR)
                .ok()
                .and_then(|v| single_char(&v))
                .unwrap_or(','),
            quote: env::var(env_vars::QUOTE)
                .ok()
                .and_then(|v| single_char(&v))
                .unwrap_or('"'),
            require_csv_extension: env::var(env_vars::REQUIRE_CSV_EXTENSION)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            log_row_statistics: env::var(env_vars::LOG_ROW_STATISTICS)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
        }
    }
}

impl ImportPreferences {
    /// Preferences with the given separator and quote, everything else default
    pub fn with_characters(separator: char, quote: char) -> Self {
        Self {
            separator,
            quote,
            ..Self::default()
        }
    }

    /// Reject character combinations the tokenizer cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.separator == self.quote {
            return Err(ConfigError::SeparatorEqualsQuote {
                character: self.separator,
            });
        }
        if matches!(self.separator, '\r' | '\n') {
            return Err(ConfigError::LineTerminator { role: "separator" });
        }
        if matches!(self.quote, '\r' | '\n') {
            return Err(ConfigError::LineTerminator { role: "quote" });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingPreferences {
    /// Whether to use structured JSON logging
    pub use_structured_logging: bool,

    /// Whether to enable console output
    pub enable_console_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            enable_console_logging: env::var(env_vars::LOGGING_ENABLE_CONSOLE)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| parse_log_level(&v))
                .unwrap_or(LogLevel::Info),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Convert to events::LogLevel for compatibility
    pub fn to_events_log_level(&self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }
}

/// Parse log level from string (used for environment variables)
pub fn parse_log_level(level: &str) -> Option<LogLevel> {
    match level.to_lowercase().as_str() {
        "error" | "0" => Some(LogLevel::Error),
        "warning" | "warn" | "1" => Some(LogLevel::Warning),
        "info" | "2" => Some(LogLevel::Info),
        "debug" | "3" => Some(LogLevel::Debug),
        _ => None,
    }
}

fn single_char(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    pub import: ImportPreferences,
    pub logging: LoggingPreferences,
}

impl RuntimeConfig {
    /// Parse a runtime configuration document; missing tables fall back to defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: RuntimeConfig = toml::from_str(source).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })?;
        config.import.validate()?;
        Ok(config)
    }

    /// Load a runtime configuration file from disk
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_toml_str(&source)
    }
}

/// Environment variable names for configuration
pub mod env_vars {
    // Import
    pub const SEPARATOR: &str = "TTCSV_SEPARATOR";
    pub const QUOTE: &str = "TTCSV_QUOTE";
    pub const REQUIRE_CSV_EXTENSION: &str = "TTCSV_REQUIRE_CSV_EXTENSION";
    pub const LOG_ROW_STATISTICS: &str = "TTCSV_LOG_ROW_STATISTICS";

    // Logging
    pub const LOGGING_USE_STRUCTURED: &str = "TTCSV_LOGGING_USE_STRUCTURED";
    pub const LOGGING_ENABLE_CONSOLE: &str = "TTCSV_LOGGING_ENABLE_CONSOLE";
    pub const LOGGING_MIN_LEVEL: &str = "TTCSV_LOGGING_MIN_LEVEL";
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("error"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("ERROR"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("0"), Some(LogLevel::Error));
        assert_eq!(parse_log_level("warn"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("warning"), Some(LogLevel::Warning));
        assert_eq!(parse_log_level("info"), Some(LogLevel::Info));
        assert_eq!(parse_log_level("3"), Some(LogLevel::Debug));
        assert_eq!(parse_log_level("verbose"), None);
    }

    #[test]
    fn test_single_char() {
        assert_eq!(single_char(";"), Some(';'));
        assert_eq!(single_char(""), None);
        assert_eq!(single_char(";;"), None);
    }

    #[test]
    fn test_preference_validation() {
        assert!(ImportPreferences::with_characters(',', '"').validate().is_ok());
        assert!(ImportPreferences::with_characters(';', '\'').validate().is_ok());
        assert_matches!(
            ImportPreferences::with_characters('"', '"').validate(),
            Err(ConfigError::SeparatorEqualsQuote { character: '"' })
        );
        assert_matches!(
            ImportPreferences::with_characters('\n', '"').validate(),
            Err(ConfigError::LineTerminator { role: "separator" })
        );
        assert_matches!(
            ImportPreferences::with_characters(',', '\r').validate(),
            Err(ConfigError::LineTerminator { role: "quote" })
        );
    }

    #[test]
    fn test_runtime_config_from_toml() {
        let config = RuntimeConfig::from_toml_str(
            r#"
            [import]
            separator = ";"
            quote = "'"
            require_csv_extension = true

            [logging]
            min_log_level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(config.import.separator, ';');
        assert_eq!(config.import.quote, '\'');
        assert!(config.import.require_csv_extension);
        assert_eq!(config.logging.min_log_level, LogLevel::Debug);
    }

    #[test]
    fn test_runtime_config_rejects_bad_characters() {
        let result = RuntimeConfig::from_toml_str(
            r#"
            [import]
            separator = "x"
            quote = "x"
            "#,
        );
        assert_matches!(result, Err(ConfigError::SeparatorEqualsQuote { .. }));

        let result = RuntimeConfig::from_toml_str("[import]\nseparator = 5\n");
        assert_matches!(result, Err(ConfigError::Parse { .. }));
    }

    #[test]
    fn test_runtime_config_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = RuntimeConfig::load(&dir.path().join("absent.toml"));
        assert_matches!(result, Err(ConfigError::Read { .. }));
    }

    #[test]
    fn test_runtime_config_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ttcsv.toml");
        std::fs::write(&path, "[import]\nseparator = \"\\t\"\n").unwrap();

        let config = RuntimeConfig::load(&path).unwrap();
        assert_eq!(config.import.separator, '\t');
    }
}
