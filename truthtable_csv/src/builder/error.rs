//! Internal-consistency faults of the table builder
//!
//! Rows reach the builder only after validation, so these indicate the
//! validator and builder disagree about the row format.

use crate::logging::codes;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BuildError {
    #[error("{file}: line {line}, column {column}: invalid entry value \"{entry}\"")]
    InvalidEntryValue {
        file: String,
        line: usize,
        column: usize,
        entry: String,
    },

    #[error("{file}: line {line}: invalid number of entries ({found}, expected {expected})")]
    EntryCountMismatch {
        file: String,
        line: usize,
        found: usize,
        expected: usize,
    },
}

impl BuildError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            BuildError::InvalidEntryValue { .. } => codes::system::INTERNAL_ERROR,
            BuildError::EntryCountMismatch { .. } => codes::install::DIMENSION_MISMATCH,
        }
    }

    pub fn severity(&self) -> &'static str {
        codes::get_severity(self.error_code().as_str()).as_str()
    }
}
