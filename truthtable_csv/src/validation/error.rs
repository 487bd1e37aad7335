//! Row-shape errors

use crate::logging::codes;
use crate::utils::CellLocation;

/// Violations of the data-row rules; lines and columns are 1-based file positions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("{file}: line {line}: row has {found} cell(s) but the header has {expected}")]
    ColumnCountMismatch {
        file: String,
        line: usize,
        found: usize,
        expected: usize,
    },

    #[error("{file}: line {line}, column {column}: invalid entry \"{entry}\" (expected 0, 1, x, X or -)")]
    InvalidEntry {
        file: String,
        line: usize,
        column: usize,
        entry: String,
    },

    #[error("{file}: no entries (the file has a header but no data rows)")]
    NoEntries { file: String },
}

impl RowError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            RowError::ColumnCountMismatch { .. } => codes::rows::COLUMN_COUNT_MISMATCH,
            RowError::InvalidEntry { .. } => codes::rows::INVALID_ENTRY,
            RowError::NoEntries { .. } => codes::rows::NO_ENTRIES,
        }
    }

    pub fn location(&self) -> Option<CellLocation> {
        match self {
            RowError::ColumnCountMismatch { line, .. } => Some(CellLocation::new(*line, 1)),
            RowError::InvalidEntry { line, column, .. } => {
                Some(CellLocation::new(*line, *column))
            }
            RowError::NoEntries { .. } => None,
        }
    }

    pub fn file(&self) -> &str {
        match self {
            RowError::ColumnCountMismatch { file, .. }
            | RowError::InvalidEntry { file, .. }
            | RowError::NoEntries { file } => file,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_mismatch_cites_both_counts() {
        let error = RowError::ColumnCountMismatch {
            file: "t.csv".to_string(),
            line: 4,
            found: 3,
            expected: 5,
        };
        let message = error.to_string();
        assert!(message.contains("line 4"));
        assert!(message.contains("3 cell(s)"));
        assert!(message.contains("header has 5"));
        assert_eq!(error.error_code().as_str(), "E060");
    }

    #[test]
    fn test_no_entries_is_distinct() {
        let error = RowError::NoEntries {
            file: "t.csv".to_string(),
        };
        assert_eq!(error.error_code(), codes::rows::NO_ENTRIES);
        assert_eq!(error.location(), None);
        assert_eq!(error.file(), "t.csv");
        assert!(!error.is_recoverable());
    }
}
