//! File processor module: the read step of an import attempt
//!
//! The file is read in full, checked against the compile-time size and line
//! limits, and released before any interpretation starts.

mod processor;

use crate::config::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use crate::config::runtime::ImportPreferences;
use crate::log_debug;
use crate::logging::codes;
use std::path::Path;

pub use processor::{FileMetadata, FileProcessingResult, FileProcessor, FileProcessorError};

/// Process a file with default settings
pub fn process_file(file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
    FileProcessor::new().process_file(file_path)
}

/// Create a file processor from runtime preferences
pub fn create_processor_from_preferences(prefs: &ImportPreferences) -> FileProcessor {
    FileProcessor::from_preferences(prefs)
}

/// Get the compile-time maximum file size limit
pub fn get_max_file_size() -> u64 {
    MAX_FILE_SIZE
}

/// Get the compile-time maximum line count
pub fn get_max_line_count() -> usize {
    MAX_LINE_COUNT
}

/// Verify that every file processing code is registered (for startup checks)
pub fn init_file_processor_logging() -> Result<(), String> {
    let required = [
        codes::file_processing::FILE_NOT_FOUND,
        codes::file_processing::INVALID_EXTENSION,
        codes::file_processing::FILE_TOO_LARGE,
        codes::file_processing::EMPTY_FILE,
        codes::file_processing::PERMISSION_DENIED,
        codes::file_processing::INVALID_ENCODING,
        codes::file_processing::IO_ERROR,
        codes::file_processing::INVALID_PATH,
        codes::file_processing::TOO_MANY_LINES,
    ];

    for code in &required {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "File processor error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    log_debug!("File processor compile-time configuration loaded",
        "max_file_size" => MAX_FILE_SIZE,
        "max_line_count" => MAX_LINE_COUNT);

    Ok(())
}
