//! Errors raised by the target model

use crate::logging::codes;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("variables rejected: {reason}")]
    DeclarationRejected { reason: String },

    #[error("rows {first_row} and {second_row} have overlapping inputs but different outputs")]
    RowConflict { first_row: usize, second_row: usize },

    #[error("row {row} has {found} entries but {expected} were declared")]
    DimensionMismatch {
        row: usize,
        found: usize,
        expected: usize,
    },

    #[error("rows installed before any variables were declared")]
    Undeclared,
}

impl ModelError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            ModelError::DeclarationRejected { .. } => codes::install::DECLARATION_REJECTED,
            ModelError::RowConflict { .. } => codes::install::ROW_CONFLICT,
            ModelError::DimensionMismatch { .. } => codes::install::DIMENSION_MISMATCH,
            ModelError::Undeclared => codes::system::INTERNAL_ERROR,
        }
    }

    /// Conflicts are the only model errors a forced install can override
    pub fn is_conflict(&self) -> bool {
        matches!(self, ModelError::RowConflict { .. })
    }

    pub fn is_recoverable(&self) -> bool {
        codes::is_recoverable(self.error_code().as_str())
    }
}
