//! In-crate target model: declared variables plus one installed truth table

use super::entry::TruthTableRow;
use super::error::ModelError;
use super::table::{find_conflict, TruthTable};
use super::{InstallMode, TruthTableModel};
use crate::config::compile_time::table::{MAX_INPUT_BITS, MAX_OUTPUT_BITS};
use crate::identifiers::names_collide;
use crate::variables::{Variable, VariableList};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Declaration {
    inputs: Vec<Variable>,
    outputs: Vec<Variable>,
}

impl Declaration {
    fn entry_count(&self) -> usize {
        self.inputs
            .iter()
            .chain(&self.outputs)
            .map(|v| v.width)
            .sum()
    }

    fn input_bits(&self) -> usize {
        self.inputs.iter().map(|v| v.width).sum()
    }
}

/// Holds the visible table; a declaration only becomes visible with its rows
#[derive(Debug, Clone, Default)]
pub struct AnalyzerModel {
    declared: Option<Declaration>,
    table: Option<TruthTable>,
}

impl AnalyzerModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently installed table, if any import has succeeded
    pub fn table(&self) -> Option<&TruthTable> {
        self.table.as_ref()
    }

    pub fn take_table(&mut self) -> Option<TruthTable> {
        self.table.take()
    }
}

impl TruthTableModel for AnalyzerModel {
    fn declare_variables(
        &mut self,
        inputs: &VariableList,
        outputs: &VariableList,
    ) -> Result<(), ModelError> {
        let rejected = |reason: String| ModelError::DeclarationRejected { reason };

        if inputs.is_empty() {
            return Err(rejected("at least one input is required".to_string()));
        }
        if inputs.total_bits() > MAX_INPUT_BITS {
            return Err(rejected(format!(
                "{} input bits exceed the limit of {}",
                inputs.total_bits(),
                MAX_INPUT_BITS
            )));
        }
        if outputs.total_bits() > MAX_OUTPUT_BITS {
            return Err(rejected(format!(
                "{} output bits exceed the limit of {}",
                outputs.total_bits(),
                MAX_OUTPUT_BITS
            )));
        }

        let all: Vec<&Variable> = inputs.vars().iter().chain(outputs.vars()).collect();
        for (position, var) in all.iter().enumerate() {
            if let Some(earlier) = all[..position]
                .iter()
                .find(|other| names_collide(&other.name, &var.name))
            {
                return Err(rejected(format!(
                    "\"{}\" and \"{}\" name the same variable",
                    earlier.name, var.name
                )));
            }
        }

        self.declared = Some(Declaration {
            inputs: inputs.vars().to_vec(),
            outputs: outputs.vars().to_vec(),
        });
        Ok(())
    }

    fn install_rows(&mut self, rows: &[TruthTableRow], mode: InstallMode) -> Result<(), ModelError> {
        let declaration = self.declared.as_ref().ok_or(ModelError::Undeclared)?;

        let expected = declaration.entry_count();
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(ModelError::DimensionMismatch {
                row: index + 1,
                found: row.len(),
                expected,
            });
        }

        if mode == InstallMode::Strict {
            if let Some((first_row, second_row)) = find_conflict(rows, declaration.input_bits()) {
                return Err(ModelError::RowConflict {
                    first_row,
                    second_row,
                });
            }
        }

        self.table = Some(TruthTable::new(
            declaration.inputs.clone(),
            declaration.outputs.clone(),
            rows.to_vec(),
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Entry;
    use assert_matches::assert_matches;

    fn list(vars: &[(&str, usize)]) -> VariableList {
        let mut list = VariableList::new(512);
        for (name, width) in vars {
            list.add(Variable::new(*name, *width)).unwrap();
        }
        list
    }

    fn row(text: &str) -> TruthTableRow {
        text.chars().filter_map(Entry::from_char).collect()
    }

    fn declared_model() -> AnalyzerModel {
        let mut model = AnalyzerModel::new();
        model
            .declare_variables(&list(&[("A", 1), ("B", 1)]), &list(&[("Y", 1)]))
            .unwrap();
        model
    }

    #[test]
    fn test_declaration_rules() {
        let mut model = AnalyzerModel::new();
        assert_matches!(
            model.declare_variables(&list(&[]), &list(&[("Y", 1)])),
            Err(ModelError::DeclarationRejected { .. })
        );
        assert_matches!(
            model.declare_variables(&list(&[("A", 1)]), &list(&[("a", 1)])),
            Err(ModelError::DeclarationRejected { ref reason }) if reason.contains("\"A\"")
        );
        assert_matches!(
            model.declare_variables(&list(&[("W", MAX_INPUT_BITS + 1)]), &list(&[])),
            Err(ModelError::DeclarationRejected { .. })
        );
        assert!(model.declare_variables(&list(&[("A", 1)]), &list(&[])).is_ok());
    }

    #[test]
    fn test_install_requires_declaration() {
        let mut model = AnalyzerModel::new();
        assert_matches!(
            model.install_rows(&[row("001")], InstallMode::Strict),
            Err(ModelError::Undeclared)
        );
    }

    #[test]
    fn test_strict_install() {
        let mut model = declared_model();
        model
            .install_rows(&[row("000"), row("011")], InstallMode::Strict)
            .unwrap();
        let table = model.table().unwrap();
        assert_eq!(table.row_count(), 2);
        assert_eq!(table.output(1, 0), Entry::One);
    }

    #[test]
    fn test_strict_install_reports_conflict_and_keeps_previous_table() {
        let mut model = declared_model();
        model.install_rows(&[row("111")], InstallMode::Strict).unwrap();

        let conflicting = [row("0-0"), row("011")];
        assert_matches!(
            model.install_rows(&conflicting, InstallMode::Strict),
            Err(ModelError::RowConflict { first_row: 1, second_row: 2 })
        );
        assert_eq!(model.table().unwrap().rows(), &[row("111")]);
    }

    #[test]
    fn test_forced_install_last_row_wins_and_is_idempotent() {
        let conflicting = [row("0-0"), row("011")];

        let mut once = declared_model();
        once.install_rows(&conflicting, InstallMode::Forced).unwrap();
        assert_eq!(once.table().unwrap().output(1, 0), Entry::One);
        assert_eq!(once.table().unwrap().output(0, 0), Entry::Zero);

        let mut twice = declared_model();
        twice.install_rows(&conflicting, InstallMode::Forced).unwrap();
        twice.install_rows(&conflicting, InstallMode::Forced).unwrap();
        assert_eq!(once.table(), twice.table());
        assert_eq!(
            once.table().unwrap().expanded_rows(),
            twice.table().unwrap().expanded_rows()
        );
    }

    #[test]
    fn test_dimension_mismatch_even_when_forced() {
        let mut model = declared_model();
        assert_matches!(
            model.install_rows(&[row("001"), row("01")], InstallMode::Forced),
            Err(ModelError::DimensionMismatch { row: 2, found: 2, expected: 3 })
        );
        assert!(model.table().is_none());
    }
}
