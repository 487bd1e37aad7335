//! Tokenized CSV document: row 0 is the header, rows 1..n are data

use serde::Serialize;

/// One tokenized field; `None` is a blank field
pub type Cell = Option<String>;

/// A whole file split into lines and cells
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedDocument {
    /// File name used in diagnostics
    pub file_name: String,
    rows: Vec<Vec<Cell>>,
}

impl ParsedDocument {
    pub fn new(file_name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            file_name: file_name.into(),
            rows,
        }
    }

    pub fn header(&self) -> Option<&[Cell]> {
        self.rows.first().map(|row| row.as_slice())
    }

    /// Data rows (everything after the header)
    pub fn data_rows(&self) -> &[Vec<Cell>] {
        self.rows.get(1..).unwrap_or(&[])
    }

    pub fn data_row_count(&self) -> usize {
        self.data_rows().len()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cell_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }
}

/// Text of a cell, with blank fields shown as an empty string
pub fn cell_text(cell: &Cell) -> &str {
    cell.as_deref().unwrap_or("")
}
