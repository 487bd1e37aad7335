//! Cell location tracking for diagnostics
//!
//! Every structural or row-shape error names the exact cell it refers to.
//! Lines and columns are both 1-based as a spreadsheet user counts them; the
//! header is line 1.
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell position in the imported file
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct CellLocation {
    /// Line number (1-based, header is line 1)
    pub line: usize,
    /// Column number (1-based)
    pub column: usize,
}

impl CellLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }

    /// Location of a header column given its 0-based index
    pub fn header(column_index: usize) -> Self {
        Self::new(1, column_index + 1)
    }

    /// Location of a cell given the 0-based document row and column indices
    pub fn from_indices(row_index: usize, column_index: usize) -> Self {
        Self::new(row_index + 1, column_index + 1)
    }
}

impl fmt::Display for CellLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}
