//! Table builder: validated data rows to entry rows

use super::error::BuildError;
use crate::document::{cell_text, Cell};
use crate::header::InterpretedHeader;
use crate::logging::codes;
use crate::model::{Entry, TruthTableRow};
use crate::utils::CellLocation;
use crate::{log_debug, log_error, log_success};

/// Converts data rows into entry rows, dropping the separator column
#[derive(Debug, Clone)]
pub struct TableBuilder<'a> {
    file_name: &'a str,
    separator_column: usize,
    entry_count: usize,
}

impl<'a> TableBuilder<'a> {
    pub fn new(file_name: &'a str, separator_column: usize, entry_count: usize) -> Self {
        Self {
            file_name,
            separator_column,
            entry_count,
        }
    }

    pub fn for_header(file_name: &'a str, header: &InterpretedHeader) -> Self {
        let input_bits = header.inputs.total_bits();
        debug_assert_eq!(header.separator_column, input_bits);
        Self::new(
            file_name,
            header.separator_column,
            input_bits + header.outputs.total_bits(),
        )
    }

    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn build(&self, rows: &[Vec<Cell>]) -> Result<Vec<TruthTableRow>, BuildError> {
        log_debug!("Building entry rows",
            "file" => self.file_name,
            "rows" => rows.len(),
            "entries_per_row" => self.entry_count);

        let result = rows
            .iter()
            .enumerate()
            .map(|(index, row)| self.build_row(index + 2, row))
            .collect::<Result<Vec<_>, _>>();

        match &result {
            Ok(built) => {
                log_success!(
                    codes::success::TABLE_BUILT,
                    "Entry rows built",
                    "file" => self.file_name,
                    "rows" => built.len()
                );
            }
            Err(error) => {
                let message = error.to_string();
                match error {
                    BuildError::InvalidEntryValue { line, column, .. } => log_error!(
                        error.error_code(),
                        &message,
                        location = CellLocation::new(*line, *column)
                    ),
                    BuildError::EntryCountMismatch { line, .. } => log_error!(
                        error.error_code(),
                        &message,
                        location = CellLocation::new(*line, 1)
                    ),
                }
            }
        }
        result
    }

    /// Convert one row; `line` is its 1-based file line
    pub fn build_row(&self, line: usize, row: &[Cell]) -> Result<TruthTableRow, BuildError> {
        let mut entries = Vec::with_capacity(self.entry_count);
        for (column_index, cell) in row.iter().enumerate() {
            if column_index == self.separator_column {
                continue;
            }
            let text = cell_text(cell);
            let entry = text
                .chars()
                .next()
                .and_then(Entry::from_char)
                .ok_or_else(|| BuildError::InvalidEntryValue {
                    file: self.file_name.to_string(),
                    line,
                    column: column_index + 1,
                    entry: text.to_string(),
                })?;
            entries.push(entry);
        }

        if entries.len() != self.entry_count {
            return Err(BuildError::EntryCountMismatch {
                file: self.file_name.to_string(),
                line,
                found: entries.len(),
                expected: self.entry_count,
            });
        }
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::interpret_header;
    use crate::validation::{RowValidator, ENTRY_ALPHABET};
    use assert_matches::assert_matches;

    fn row(values: &[&str]) -> Vec<Cell> {
        values
            .iter()
            .map(|v| (!v.is_empty()).then(|| v.to_string()))
            .collect()
    }

    #[test]
    fn test_builds_rows_without_separator() {
        let builder = TableBuilder::new("t.csv", 2, 3);
        let rows = vec![row(&["0", "x", "", "1"]), row(&["X", "-", "|", "0"])];
        let built = builder.build(&rows).unwrap();
        assert_eq!(
            built,
            vec![
                vec![Entry::Zero, Entry::DontCare, Entry::One],
                vec![Entry::DontCare, Entry::DontCare, Entry::Zero],
            ]
        );
    }

    #[test]
    fn test_unreachable_entry_value_is_reported() {
        let builder = TableBuilder::new("t.csv", 1, 2);
        assert_matches!(
            builder.build(&[row(&["0", "", "7"])]),
            Err(BuildError::InvalidEntryValue { line: 2, column: 3, .. })
        );
        assert_matches!(
            builder.build_row(5, &row(&["", "", "1"])),
            Err(BuildError::InvalidEntryValue { line: 5, column: 1, .. })
        );
    }

    #[test]
    fn test_entry_count_mismatch_is_reported() {
        let builder = TableBuilder::new("t.csv", 1, 3);
        let error = builder.build(&[row(&["0", "", "1"])]).unwrap_err();
        assert_matches!(
            error,
            BuildError::EntryCountMismatch { line: 2, found: 2, expected: 3, .. }
        );
        assert_eq!(error.severity(), "High");
    }

    #[test]
    fn test_every_validated_cell_builds() {
        // Every character the validator accepts must convert without a fault
        let header = interpret_header("t.csv", &row(&["A", "|", "Y"])).unwrap();
        let validator = RowValidator::for_header("t.csv", &header);
        let builder = TableBuilder::for_header("t.csv", &header);

        for input in ENTRY_ALPHABET {
            for output in ENTRY_ALPHABET {
                let (input, output) = (input.to_string(), output.to_string());
                let rows = vec![row(&[input.as_str(), "", output.as_str()])];
                validator.validate(&rows).unwrap();
                let built = builder.build(&rows).unwrap();
                assert_eq!(built[0].len(), 2);
            }
        }
    }
}
