//! Header-structural errors

use crate::logging::codes;
use crate::utils::CellLocation;
use serde::Serialize;
use std::fmt;

/// Which side of the separator marker a variable belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum VariableSide {
    Inputs,
    Outputs,
}

impl fmt::Display for VariableSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VariableSide::Inputs => write!(f, "inputs"),
            VariableSide::Outputs => write!(f, "outputs"),
        }
    }
}

/// Violations of the header rules; columns are 1-based
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HeaderError {
    #[error("{file}: no separator found (no header cell contains '|')")]
    NoSeparator { file: String },

    #[error("{file}: more than one separator column (column {column})")]
    DuplicateSeparator { file: String, column: usize },

    #[error("{file}: no inputs found before the separator")]
    NoInputs { file: String },

    #[error("{file}: column {column}: \"{field}\" is not a valid variable name")]
    InvalidName {
        file: String,
        column: usize,
        field: String,
    },

    #[error("{file}: column {column}: variable \"{name}\" is already defined")]
    DuplicateName {
        file: String,
        column: usize,
        name: String,
    },

    #[error("{file}: column {column}: bits of \"{name}\" are not in descending order (index {index})")]
    BitOrder {
        file: String,
        column: usize,
        name: String,
        index: usize,
    },

    #[error("{file}: column {column}: bit {index} of \"{name}\" is specified twice")]
    DuplicateBit {
        file: String,
        column: usize,
        name: String,
        index: usize,
    },

    #[error("{file}: bit {index} of \"{name}\" is not specified")]
    BitNotSpecified {
        file: String,
        name: String,
        index: usize,
    },

    #[error("{file}: column {column}: \"{field}\" needs {needed} empty column(s) after it")]
    InsufficientFiller {
        file: String,
        column: usize,
        field: String,
        needed: usize,
    },

    #[error("{file}: column {column}: unexpected empty header cell")]
    UnexpectedEmpty { file: String, column: usize },

    #[error("{file}: column {column}: \"{field}\" has an invalid bit range")]
    InvalidRange {
        file: String,
        column: usize,
        field: String,
    },

    #[error("{file}: column {column}: \"{field}\" exceeds the {side} limit of {max_bits} bits")]
    CapacityExceeded {
        file: String,
        column: usize,
        field: String,
        side: VariableSide,
        max_bits: usize,
    },

    #[error("{file}: column {column}: bits of \"{name}\" appear on both sides of the separator")]
    VectorSplitAcrossSeparator {
        file: String,
        column: usize,
        name: String,
    },
}

impl HeaderError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            HeaderError::NoSeparator { .. } => codes::header::NO_SEPARATOR,
            HeaderError::DuplicateSeparator { .. } => codes::header::DUPLICATE_SEPARATOR,
            HeaderError::NoInputs { .. } => codes::header::NO_INPUTS,
            HeaderError::InvalidName { .. } => codes::header::INVALID_NAME,
            HeaderError::DuplicateName { .. } => codes::header::DUPLICATE_NAME,
            HeaderError::BitOrder { .. } => codes::header::BIT_ORDER,
            HeaderError::DuplicateBit { .. } => codes::header::DUPLICATE_BIT,
            HeaderError::BitNotSpecified { .. } => codes::header::BIT_NOT_SPECIFIED,
            HeaderError::InsufficientFiller { .. } => codes::header::INSUFFICIENT_FILLER,
            HeaderError::UnexpectedEmpty { .. } => codes::header::UNEXPECTED_EMPTY,
            HeaderError::InvalidRange { .. } => codes::header::INVALID_RANGE,
            HeaderError::CapacityExceeded { .. } => codes::header::CAPACITY_EXCEEDED,
            HeaderError::VectorSplitAcrossSeparator { .. } => codes::header::VECTOR_SPLIT,
        }
    }

    /// Header cell the error refers to, when it names one
    pub fn location(&self) -> Option<CellLocation> {
        match self {
            HeaderError::NoSeparator { .. }
            | HeaderError::NoInputs { .. }
            | HeaderError::BitNotSpecified { .. } => None,
            HeaderError::DuplicateSeparator { column, .. }
            | HeaderError::InvalidName { column, .. }
            | HeaderError::DuplicateName { column, .. }
            | HeaderError::BitOrder { column, .. }
            | HeaderError::DuplicateBit { column, .. }
            | HeaderError::InsufficientFiller { column, .. }
            | HeaderError::UnexpectedEmpty { column, .. }
            | HeaderError::InvalidRange { column, .. }
            | HeaderError::CapacityExceeded { column, .. }
            | HeaderError::VectorSplitAcrossSeparator { column, .. } => {
                Some(CellLocation::new(1, *column))
            }
        }
    }

    pub fn file(&self) -> &str {
        match self {
            HeaderError::NoSeparator { file }
            | HeaderError::DuplicateSeparator { file, .. }
            | HeaderError::NoInputs { file }
            | HeaderError::InvalidName { file, .. }
            | HeaderError::DuplicateName { file, .. }
            | HeaderError::BitOrder { file, .. }
            | HeaderError::DuplicateBit { file, .. }
            | HeaderError::BitNotSpecified { file, .. }
            | HeaderError::InsufficientFiller { file, .. }
            | HeaderError::UnexpectedEmpty { file, .. }
            | HeaderError::InvalidRange { file, .. }
            | HeaderError::CapacityExceeded { file, .. }
            | HeaderError::VectorSplitAcrossSeparator { file, .. } => file,
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
    fn test_messages_carry_context() {
        let error = HeaderError::InvalidName {
            file: "t.csv".to_string(),
            column: 3,
            field: "1x".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("t.csv"));
        assert!(message.contains("column 3"));
        assert!(message.contains("\"1x\""));
        assert_eq!(error.location(), Some(CellLocation::new(1, 3)));
        assert_eq!(error.file(), "t.csv");
    }

    #[test]
    fn test_codes_and_classification() {
        let error = HeaderError::BitNotSpecified {
            file: "t.csv".to_string(),
            name: "B".to_string(),
            index: 0,
        };
        assert_eq!(error.error_code().as_str(), "E046");
        assert_eq!(error.location(), None);
        assert!(!error.is_recoverable());
        assert_eq!(error.severity(), "Medium");

        let error = HeaderError::CapacityExceeded {
            file: "t.csv".to_string(),
            column: 1,
            field: "W[30..0]".to_string(),
            side: VariableSide::Inputs,
            max_bits: 20,
        };
        assert!(error.to_string().contains("inputs limit of 20 bits"));
        assert_eq!(error.error_code().as_str(), "E050");
    }
}
