//! Row validator: data rows against the header shape and the entry alphabet

use super::error::RowError;
use crate::document::{cell_text, Cell};
use crate::header::InterpretedHeader;
use crate::logging::codes;
use crate::{log_debug, log_error, log_success};
use serde::Serialize;

/// Characters a data cell may hold; `x`, `X` and `-` all mean don't care
pub const ENTRY_ALPHABET: [char; 5] = ['0', '1', 'x', 'X', '-'];

/// Whether a cell's text is exactly one alphabet character
pub fn is_valid_entry(text: &str) -> bool {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => ENTRY_ALPHABET.contains(&c),
        _ => false,
    }
}

/// Counts gathered over an accepted row set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowStatistics {
    pub row_count: usize,
    pub zero_count: usize,
    pub one_count: usize,
    pub dont_care_count: usize,
}

impl RowStatistics {
    fn count(&mut self, text: &str) {
        match text {
            "0" => self.zero_count += 1,
            "1" => self.one_count += 1,
            _ => self.dont_care_count += 1,
        }
    }
}

/// Validates data rows; the first violation aborts the pass
#[derive(Debug, Clone)]
pub struct RowValidator<'a> {
    file_name: &'a str,
    column_count: usize,
    separator_column: usize,
    log_row_statistics: bool,
}

impl<'a> RowValidator<'a> {
    pub fn new(file_name: &'a str, column_count: usize, separator_column: usize) -> Self {
        Self {
            file_name,
            column_count,
            separator_column,
            log_row_statistics: false,
        }
    }

    /// Validator for the shape of an interpreted header
    pub fn for_header(file_name: &'a str, header: &InterpretedHeader) -> Self {
        Self::new(file_name, header.column_count, header.separator_column)
    }

    pub fn with_row_statistics(mut self, enabled: bool) -> Self {
        self.log_row_statistics = enabled;
        self
    }

    /// Validate every data row (document rows 1..n)
    pub fn validate(&self, rows: &[Vec<Cell>]) -> Result<RowStatistics, RowError> {
        log_debug!("Validating data rows",
            "file" => self.file_name,
            "rows" => rows.len(),
            "columns" => self.column_count);

        match self.validate_rows(rows) {
            Ok(stats) => {
                log_success!(
                    codes::success::ROWS_VALIDATED,
                    "Data rows validated",
                    "file" => self.file_name,
                    "rows" => stats.row_count,
                    "dont_cares" => stats.dont_care_count
                );
                Ok(stats)
            }
            Err(error) => {
                let message = error.to_string();
                match error.location() {
                    Some(location) => log_error!(error.error_code(), &message, location = location),
                    None => log_error!(error.error_code(), &message),
                }
                Err(error)
            }
        }
    }

    fn validate_rows(&self, rows: &[Vec<Cell>]) -> Result<RowStatistics, RowError> {
        if rows.is_empty() {
            return Err(RowError::NoEntries {
                file: self.file_name.to_string(),
            });
        }

        let mut stats = RowStatistics::default();
        for (row_index, row) in rows.iter().enumerate() {
            // Header is line 1
            let line = row_index + 2;
            if row.len() != self.column_count {
                return Err(RowError::ColumnCountMismatch {
                    file: self.file_name.to_string(),
                    line,
                    found: row.len(),
                    expected: self.column_count,
                });
            }

            for (column_index, cell) in row.iter().enumerate() {
                if column_index == self.separator_column {
                    continue;
                }
                let text = cell_text(cell);
                if !is_valid_entry(text) {
                    return Err(RowError::InvalidEntry {
                        file: self.file_name.to_string(),
                        line,
                        column: column_index + 1,
                        entry: text.to_string(),
                    });
                }
                stats.count(text);
            }
            stats.row_count += 1;

            if self.log_row_statistics {
                log_debug!("Row accepted",
                    "line" => line,
                    "cells" => row.len());
            }
        }

        Ok(stats)
    }
}
