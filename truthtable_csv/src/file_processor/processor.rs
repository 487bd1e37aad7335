//! File processor: path checks, size and line limits, UTF-8 read

use crate::config::compile_time::file_processing::{MAX_FILE_SIZE, MAX_LINE_COUNT};
use crate::config::runtime::ImportPreferences;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use std::fs;
use std::path::{Path, PathBuf};

/// File processor specific errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FileProcessorError {
    #[error("File not found: {path}")]
    FileNotFound { path: String },

    #[error("Not a regular file: {path}")]
    NotAFile { path: String },

    #[error("Invalid file path: {path:?}")]
    InvalidPath { path: String },

    #[error("Invalid file extension: expected .csv, found {extension:?}")]
    InvalidExtension { extension: Option<String> },

    #[error("File too large: {size} bytes (max: {max_size})")]
    FileTooLarge { size: u64, max_size: u64 },

    #[error("File is empty: {path}")]
    EmptyFile { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid UTF-8 encoding in file: {path}")]
    InvalidEncoding { path: String },

    #[error("File exceeds maximum line count: {lines} (max: {max_lines})")]
    TooManyLines { lines: usize, max_lines: usize },

    #[error("I/O error reading file: {message}")]
    IoError { message: String },
}

impl FileProcessorError {
    /// Get error code for this error
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            FileProcessorError::FileNotFound { .. } => codes::file_processing::FILE_NOT_FOUND,
            FileProcessorError::NotAFile { .. } | FileProcessorError::InvalidPath { .. } => {
                codes::file_processing::INVALID_PATH
            }
            FileProcessorError::InvalidExtension { .. } => {
                codes::file_processing::INVALID_EXTENSION
            }
            FileProcessorError::FileTooLarge { .. } => codes::file_processing::FILE_TOO_LARGE,
            FileProcessorError::EmptyFile { .. } => codes::file_processing::EMPTY_FILE,
            FileProcessorError::PermissionDenied { .. } => {
                codes::file_processing::PERMISSION_DENIED
            }
            FileProcessorError::InvalidEncoding { .. } => codes::file_processing::INVALID_ENCODING,
            FileProcessorError::TooManyLines { .. } => codes::file_processing::TOO_MANY_LINES,
            FileProcessorError::IoError { .. } => codes::file_processing::IO_ERROR,
        }
    }

    /// Check if this error should stop the import
    pub fn requires_halt(&self) -> bool {
        codes::requires_halt(self.error_code().as_str())
    }

    /// Get severity from the code registry
    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    /// Get error category
    pub fn category(&self) -> &'static str {
        codes::get_category(self.error_code().as_str())
    }

    /// Check if error is recoverable
    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

/// File metadata collected during processing
#[derive(Debug, Clone)]
pub struct FileMetadata {
    /// Canonical file path
    pub path: PathBuf,
    /// Final path component, used in diagnostics
    pub file_name: String,
    /// File size in bytes
    pub size: u64,
    /// Lower-cased extension (if any)
    pub extension: Option<String>,
    /// Number of lines in file
    pub line_count: usize,
    pub is_csv_file: bool,
    pub modified: Option<std::time::SystemTime>,
}

impl FileMetadata {
    /// Get file size in human-readable format
    pub fn human_readable_size(&self) -> String {
        human_readable(self.size)
    }
}

fn human_readable(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.2} {}", size, UNITS[unit_index])
    }
}

/// File contents plus metadata
#[derive(Debug, Clone)]
pub struct FileProcessingResult {
    pub source: String,
    pub metadata: FileMetadata,
    pub processing_duration: std::time::Duration,
}

impl FileProcessingResult {
    /// Number of characters in the source
    pub fn char_count(&self) -> usize {
        self.source.chars().count()
    }
}

/// File processor with compile-time limits and runtime preferences
#[derive(Debug, Clone, Default)]
pub struct FileProcessor {
    /// Whether to refuse files without a .csv extension
    pub require_csv_extension: bool,
}

impl FileProcessor {
    /// Create processor with default preferences
    pub fn new() -> Self {
        Self::default()
    }

    /// Create processor from runtime import preferences
    pub fn from_preferences(prefs: &ImportPreferences) -> Self {
        Self {
            require_csv_extension: prefs.require_csv_extension,
        }
    }

    /// Require or allow files without a .csv extension
    pub fn with_csv_extension_required(mut self, required: bool) -> Self {
        self.require_csv_extension = required;
        self
    }

    /// Compile-time file size limit in bytes
    pub fn max_file_size() -> u64 {
        MAX_FILE_SIZE
    }

    /// Read a file and return its contents with metadata
    pub fn process_file(&self, file_path: &Path) -> Result<FileProcessingResult, FileProcessorError> {
        let start_time = std::time::Instant::now();
        let display_path = file_path.display().to_string();

        log_debug!("Starting file processing", "file" => display_path);

        let path = self.validate_path(file_path)?;
        let mut metadata = self.get_metadata(&path)?;
        self.validate_file(&metadata)?;
        let source = self.read_file(&path)?;

        let line_count = source.lines().count();
        if line_count > MAX_LINE_COUNT {
            let error = FileProcessorError::TooManyLines {
                lines: line_count,
                max_lines: MAX_LINE_COUNT,
            };
            log_error!(error.error_code(), "File exceeds maximum line count",
                "file" => metadata.file_name,
                "lines" => line_count,
                "max_lines" => MAX_LINE_COUNT);
            return Err(error);
        }
        metadata.line_count = line_count;

        let result = FileProcessingResult {
            source,
            metadata,
            processing_duration: start_time.elapsed(),
        };

        log_success!(
            codes::success::FILE_PROCESSING_SUCCESS,
            "File read successfully",
            "file" => result.metadata.file_name,
            "size_bytes" => result.metadata.size,
            "size_human" => result.metadata.human_readable_size(),
            "lines" => result.metadata.line_count,
            "duration_ms" => format!("{:.2}", result.processing_duration.as_secs_f64() * 1000.0)
        );

        Ok(result)
    }

    fn validate_path(&self, file_path: &Path) -> Result<PathBuf, FileProcessorError> {
        let path_str = file_path.display().to_string();

        if file_path.as_os_str().is_empty() {
            let error = FileProcessorError::InvalidPath { path: path_str };
            log_error!(error.error_code(), "Empty file path provided");
            return Err(error);
        }

        if !file_path.exists() {
            let error = FileProcessorError::FileNotFound {
                path: path_str.clone(),
            };
            log_error!(error.error_code(), "File not found", "path" => path_str);
            return Err(error);
        }

        if !file_path.is_file() {
            let error = FileProcessorError::NotAFile {
                path: path_str.clone(),
            };
            log_error!(error.error_code(), "Path is not a file", "path" => path_str);
            return Err(error);
        }

        file_path.canonicalize().map_err(|e| {
            let error = io_error(file_path, &e);
            log_error!(error.error_code(), "Failed to canonicalize path",
                "path" => path_str,
                "io_error" => e);
            error
        })
    }

    fn get_metadata(&self, path: &Path) -> Result<FileMetadata, FileProcessorError> {
        let metadata = fs::metadata(path).map_err(|e| {
            let error = io_error(path, &e);
            log_error!(error.error_code(), "Failed to read file metadata",
                "path" => path.display(),
                "io_error" => e);
            error
        })?;

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|s| s.to_lowercase());
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let file_metadata = FileMetadata {
            path: path.to_path_buf(),
            file_name,
            size: metadata.len(),
            is_csv_file: extension.as_deref() == Some("csv"),
            extension,
            line_count: 0,
            modified: metadata.modified().ok(),
        };

        log_debug!("File metadata collected",
            "size_bytes" => file_metadata.size,
            "extension" => file_metadata.extension.as_deref().unwrap_or("none"),
            "max_size_bytes" => MAX_FILE_SIZE);

        Ok(file_metadata)
    }

    fn validate_file(&self, metadata: &FileMetadata) -> Result<(), FileProcessorError> {
        if metadata.size > MAX_FILE_SIZE {
            let error = FileProcessorError::FileTooLarge {
                size: metadata.size,
                max_size: MAX_FILE_SIZE,
            };
            log_error!(error.error_code(), "File exceeds compile-time maximum size limit",
                "file" => metadata.file_name,
                "size_human" => metadata.human_readable_size(),
                "limit_human" => human_readable(MAX_FILE_SIZE));
            return Err(error);
        }

        if metadata.size == 0 {
            let error = FileProcessorError::EmptyFile {
                path: metadata.file_name.clone(),
            };
            log_error!(error.error_code(), "File is empty", "file" => metadata.file_name);
            return Err(error);
        }

        if self.require_csv_extension && !metadata.is_csv_file {
            let error = FileProcessorError::InvalidExtension {
                extension: metadata.extension.clone(),
            };
            log_error!(error.error_code(), "File does not have required .csv extension",
                "file" => metadata.file_name,
                "extension" => metadata.extension.as_deref().unwrap_or("none"));
            return Err(error);
        }

        Ok(())
    }

    fn read_file(&self, path: &Path) -> Result<String, FileProcessorError> {
        fs::read_to_string(path).map_err(|e| {
            let error = match e.kind() {
                std::io::ErrorKind::InvalidData => FileProcessorError::InvalidEncoding {
                    path: path.display().to_string(),
                },
                _ => io_error(path, &e),
            };
            log_error!(error.error_code(), "Failed to read file contents",
                "path" => path.display(),
                "io_error" => e);
            error
        })
    }
}

fn io_error(path: &Path, e: &std::io::Error) -> FileProcessorError {
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => FileProcessorError::PermissionDenied {
            path: path.display().to_string(),
        },
        std::io::ErrorKind::NotFound => FileProcessorError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => FileProcessorError::IoError {
            message: format!("'{}': {}", path.display(), e),
        },
    }
}
