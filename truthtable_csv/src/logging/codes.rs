//! Consolidated diagnostic codes and classification system
//!
//! Single source of truth for all codes, their metadata, and classification functions.
//! Code constants live next to the behavioural metadata describing them.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for error, warning and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for a code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const INVALID_CONFIGURATION: Code = Code::new("ERR003");
}

/// File processing error codes
pub mod file_processing {
    use super::Code;

    pub const FILE_NOT_FOUND: Code = Code::new("E005");
    pub const INVALID_EXTENSION: Code = Code::new("E006");
    pub const FILE_TOO_LARGE: Code = Code::new("E007");
    pub const EMPTY_FILE: Code = Code::new("E008");
    pub const PERMISSION_DENIED: Code = Code::new("E009");
    pub const INVALID_ENCODING: Code = Code::new("E010");
    pub const IO_ERROR: Code = Code::new("E011");
    pub const INVALID_PATH: Code = Code::new("E012");
    pub const TOO_MANY_LINES: Code = Code::new("E013");
}

/// Tokenizer warning codes
pub mod lexical {
    use super::Code;

    pub const UNTERMINATED_QUOTE: Code = Code::new("W020");
}

/// Header interpretation error codes
pub mod header {
    use super::Code;

    pub const NO_SEPARATOR: Code = Code::new("E040");
    pub const NO_INPUTS: Code = Code::new("E041");
    pub const INVALID_NAME: Code = Code::new("E042");
    pub const DUPLICATE_NAME: Code = Code::new("E043");
    pub const BIT_ORDER: Code = Code::new("E044");
    pub const DUPLICATE_BIT: Code = Code::new("E045");
    pub const BIT_NOT_SPECIFIED: Code = Code::new("E046");
    pub const INSUFFICIENT_FILLER: Code = Code::new("E047");
    pub const UNEXPECTED_EMPTY: Code = Code::new("E048");
    pub const INVALID_RANGE: Code = Code::new("E049");
    pub const CAPACITY_EXCEEDED: Code = Code::new("E050");
    pub const DUPLICATE_SEPARATOR: Code = Code::new("E051");
    pub const VECTOR_SPLIT: Code = Code::new("E052");
}

/// Data row validation error codes
pub mod rows {
    use super::Code;

    pub const COLUMN_COUNT_MISMATCH: Code = Code::new("E060");
    pub const INVALID_ENTRY: Code = Code::new("E061");
    pub const NO_ENTRIES: Code = Code::new("E062");
}

/// Model hand-off error codes
pub mod install {
    use super::Code;

    pub const DECLARATION_REJECTED: Code = Code::new("E080");
    pub const ROW_CONFLICT: Code = Code::new("E081");
    pub const FORCED_INSTALL_FAILED: Code = Code::new("E082");
    pub const DIMENSION_MISMATCH: Code = Code::new("E083");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const FILE_PROCESSING_SUCCESS: Code = Code::new("I006");
    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const HEADER_INTERPRETED: Code = Code::new("I040");
    pub const ROWS_VALIDATED: Code = Code::new("I060");
    pub const TABLE_BUILT: Code = Code::new("I070");
    pub const TABLE_INSTALLED: Code = Code::new("I080");
    pub const TABLE_FORCE_INSTALLED: Code = Code::new("I081");
    pub const INSTALL_DECLINED: Code = Code::new("I082");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

static ERROR_REGISTRY: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();

#[allow(clippy::too_many_arguments)]
fn register(
    registry: &mut HashMap<&'static str, ErrorMetadata>,
    code: Code,
    category: &'static str,
    severity: Severity,
    recoverable: bool,
    requires_halt: bool,
    description: &'static str,
    recommended_action: &'static str,
) {
    registry.insert(
        code.as_str(),
        ErrorMetadata {
            code: code.as_str(),
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        },
    );
}

/// Initialize and get the error registry
fn get_error_registry() -> &'static HashMap<&'static str, ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        let mut r = HashMap::new();

        // System
        register(&mut r, system::INTERNAL_ERROR, "System", Severity::Critical, false, true,
            "Internal consistency fault between validator and table builder",
            "File a bug report with the offending file attached");
        register(&mut r, system::INITIALIZATION_FAILURE, "System", Severity::Critical, false, true,
            "Logging or configuration subsystem failed to initialise",
            "Check configuration and restart");
        register(&mut r, system::INVALID_CONFIGURATION, "System", Severity::High, false, true,
            "Runtime configuration is unreadable or inconsistent",
            "Fix the configuration file or environment variables");

        // File processing
        register(&mut r, file_processing::FILE_NOT_FOUND, "FileProcessing", Severity::High, false, true,
            "The selected file does not exist",
            "Check the file path");
        register(&mut r, file_processing::INVALID_EXTENSION, "FileProcessing", Severity::Medium, false, true,
            "The file does not carry a .csv extension",
            "Rename the file or disable the extension requirement");
        register(&mut r, file_processing::FILE_TOO_LARGE, "FileProcessing", Severity::High, false, true,
            "The file exceeds the compile-time size limit",
            "Split the table or raise max_file_size in the build profile");
        register(&mut r, file_processing::EMPTY_FILE, "FileProcessing", Severity::Medium, false, true,
            "The file contains no data",
            "Export the table again");
        register(&mut r, file_processing::PERMISSION_DENIED, "FileProcessing", Severity::High, false, true,
            "The file cannot be read with current permissions",
            "Adjust file permissions");
        register(&mut r, file_processing::INVALID_ENCODING, "FileProcessing", Severity::High, false, true,
            "The file is not valid UTF-8 text",
            "Re-export the table as UTF-8 CSV");
        register(&mut r, file_processing::IO_ERROR, "FileProcessing", Severity::High, false, true,
            "Reading the file failed",
            "Retry or check the storage device");
        register(&mut r, file_processing::INVALID_PATH, "FileProcessing", Severity::Medium, false, true,
            "The path is empty or does not name a regular file",
            "Select a regular file");
        register(&mut r, file_processing::TOO_MANY_LINES, "FileProcessing", Severity::High, false, true,
            "The file has more lines than the compile-time limit",
            "Reduce the number of rows");

        // Lexical
        register(&mut r, lexical::UNTERMINATED_QUOTE, "Lexical", Severity::Low, true, false,
            "A quoted cell runs to the end of its line",
            "Close the quoted cell if the content looks wrong");

        // Header
        register(&mut r, header::NO_SEPARATOR, "Header", Severity::Medium, false, true,
            "No header cell contains the '|' input/output separator",
            "Add a '|' column between the inputs and the outputs");
        register(&mut r, header::NO_INPUTS, "Header", Severity::Medium, false, true,
            "The header declares no input variables",
            "Declare at least one input before the separator");
        register(&mut r, header::INVALID_NAME, "Header", Severity::Medium, false, true,
            "A header cell is not a valid variable name or bit index",
            "Use letters, digits and underscores, starting with a letter");
        register(&mut r, header::DUPLICATE_NAME, "Header", Severity::Medium, false, true,
            "A variable name is declared twice (names are case-insensitive)",
            "Rename one of the variables");
        register(&mut r, header::BIT_ORDER, "Header", Severity::Medium, false, true,
            "Indexed bit columns are not in descending MSB-first order",
            "List name:index columns from the highest index down to 0");
        register(&mut r, header::DUPLICATE_BIT, "Header", Severity::Medium, false, true,
            "An indexed bit column appears twice",
            "Remove the repeated column");
        register(&mut r, header::BIT_NOT_SPECIFIED, "Header", Severity::Medium, false, true,
            "A bit of an indexed vector has no column",
            "Add the missing name:index column");
        register(&mut r, header::INSUFFICIENT_FILLER, "Header", Severity::Medium, false, true,
            "A ranged vector is not followed by enough blank filler columns",
            "Leave width-1 empty header cells after name[hi..0]");
        register(&mut r, header::UNEXPECTED_EMPTY, "Header", Severity::Medium, false, true,
            "A blank header cell is not reserved by a ranged vector",
            "Name the column or remove it");
        register(&mut r, header::INVALID_RANGE, "Header", Severity::Medium, false, true,
            "A ranged vector declaration has a malformed or non-positive width",
            "Write name[hi..0] or name[width]");
        register(&mut r, header::CAPACITY_EXCEEDED, "Header", Severity::Medium, false, true,
            "Too many input or output bits for the analyzer",
            "Reduce the number of variables");
        register(&mut r, header::DUPLICATE_SEPARATOR, "Header", Severity::Medium, false, true,
            "More than one header cell contains the '|' separator",
            "Keep a single separator column");
        register(&mut r, header::VECTOR_SPLIT, "Header", Severity::Medium, false, true,
            "Bits of one indexed vector appear on both sides of the separator",
            "Keep all bits of a vector on one side");

        // Rows
        register(&mut r, rows::COLUMN_COUNT_MISMATCH, "Rows", Severity::Medium, false, true,
            "A data row has a different number of cells than the header",
            "Make every row as wide as the header; blank lines are not allowed");
        register(&mut r, rows::INVALID_ENTRY, "Rows", Severity::Medium, false, true,
            "A data cell is not one of 0, 1, x, X or -",
            "Replace the cell with a valid entry");
        register(&mut r, rows::NO_ENTRIES, "Rows", Severity::Medium, false, true,
            "The file contains a header but no data rows",
            "Add at least one truth-table row");

        // Install
        register(&mut r, install::DECLARATION_REJECTED, "Install", Severity::High, false, true,
            "The analyzer rejected the declared inputs and outputs",
            "Fix the header so the variables satisfy the analyzer's rules");
        register(&mut r, install::ROW_CONFLICT, "Install", Severity::Medium, true, false,
            "Rows with overlapping inputs specify different outputs",
            "Confirm to force the import or fix the conflicting rows");
        register(&mut r, install::FORCED_INSTALL_FAILED, "Install", Severity::High, false, true,
            "The analyzer refused the rows even when forced",
            "File a bug report with the offending file attached");
        register(&mut r, install::DIMENSION_MISMATCH, "Install", Severity::High, false, true,
            "A row's entry count does not match the declared variables",
            "File a bug report with the offending file attached");

        // Success
        for (code, description) in [
            (success::OPERATION_COMPLETED_SUCCESSFULLY, "Operation completed successfully"),
            (success::SYSTEM_INITIALIZATION_COMPLETED, "System initialization completed"),
            (success::FILE_PROCESSING_SUCCESS, "File read successfully"),
            (success::TOKENIZATION_COMPLETE, "All lines tokenized"),
            (success::HEADER_INTERPRETED, "Header interpreted into inputs and outputs"),
            (success::ROWS_VALIDATED, "All data rows validated"),
            (success::TABLE_BUILT, "Entry rows built"),
            (success::TABLE_INSTALLED, "Table installed into the analyzer"),
            (success::TABLE_FORCE_INSTALLED, "Table force-installed after confirmation"),
            (success::INSTALL_DECLINED, "Import cancelled at the conflict prompt"),
        ] {
            register(&mut r, code, "Success", Severity::Low, true, false, description,
                "Continue");
        }

        r
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code)
}

/// Get error severity from code
pub fn get_severity(code: &str) -> Severity {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for code
pub fn get_description(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for code
pub fn get_action(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get category from code
pub fn get_category(code: &str) -> &'static str {
    get_error_registry()
        .get(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_header_code_is_registered() {
        let codes = [
            header::NO_SEPARATOR,
            header::NO_INPUTS,
            header::INVALID_NAME,
            header::DUPLICATE_NAME,
            header::BIT_ORDER,
            header::DUPLICATE_BIT,
            header::BIT_NOT_SPECIFIED,
            header::INSUFFICIENT_FILLER,
            header::UNEXPECTED_EMPTY,
            header::INVALID_RANGE,
            header::CAPACITY_EXCEEDED,
            header::DUPLICATE_SEPARATOR,
            header::VECTOR_SPLIT,
        ];
        for code in codes {
            let metadata = get_error_metadata(code.as_str()).unwrap();
            assert_eq!(metadata.category, "Header");
            assert!(metadata.requires_halt);
        }
    }

    #[test]
    fn test_conflict_is_recoverable() {
        assert!(is_recoverable(install::ROW_CONFLICT.as_str()));
        assert!(!requires_halt(install::ROW_CONFLICT.as_str()));
        assert!(!is_recoverable(install::DECLARATION_REJECTED.as_str()));
    }

    #[test]
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("Z999"), "Unknown error");
        assert_eq!(get_category("Z999"), "Unknown");
        assert_eq!(get_severity("Z999"), Severity::Medium);
    }

    #[test]
    fn test_internal_error_is_critical() {
        assert_eq!(
            get_severity(system::INTERNAL_ERROR.as_str()),
            Severity::Critical
        );
        assert_eq!(get_category(system::INTERNAL_ERROR.as_str()), "System");
    }
}
