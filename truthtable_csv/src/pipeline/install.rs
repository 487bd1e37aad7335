//! Hand-off of a parsed table to a model, with confirm-to-force on conflicts

use super::error::ImportError;
use super::report::ImportReport;
use crate::logging::codes;
use crate::model::{InstallMode, ModelError, TruthTableModel, TruthTableRow};
use crate::variables::VariableList;
use crate::{log_error, log_success, log_warning};

/// Shown with the model's conflict message when asking whether to force the import
pub const TABLE_PARSE_ERROR_MESSAGE: &str =
    "The table contains conflicting rows. Import it anyway? Later rows take precedence.";

/// A fully validated table that has not been handed to a model yet
#[derive(Debug, Clone)]
pub struct ParsedTable {
    inputs: VariableList,
    outputs: VariableList,
    rows: Vec<TruthTableRow>,
    report: ImportReport,
}

/// Result of a strict install attempt
#[derive(Debug)]
pub enum InstallOutcome {
    Accepted(ImportReport),
    Rejected(ImportError),
    ConflictNeedsConfirmation(PendingInstall),
}

impl ParsedTable {
    pub fn new(
        inputs: VariableList,
        outputs: VariableList,
        rows: Vec<TruthTableRow>,
        report: ImportReport,
    ) -> Self {
        Self {
            inputs,
            outputs,
            rows,
            report,
        }
    }

    pub fn inputs(&self) -> &VariableList {
        &self.inputs
    }

    pub fn outputs(&self) -> &VariableList {
        &self.outputs
    }

    pub fn rows(&self) -> &[TruthTableRow] {
        &self.rows
    }

    pub fn report(&self) -> &ImportReport {
        &self.report
    }

    pub(crate) fn report_mut(&mut self) -> &mut ImportReport {
        &mut self.report
    }

    /// Declare the variables, then install the rows strictly
    pub fn install<M: TruthTableModel + ?Sized>(self, model: &mut M) -> InstallOutcome {
        if let Err(error) = model.declare_variables(&self.inputs, &self.outputs) {
            log_error!(error.error_code(), &error.to_string(),
                "file" => self.report.file_name);
            return InstallOutcome::Rejected(error.into());
        }

        match model.install_rows(&self.rows, InstallMode::Strict) {
            Ok(()) => {
                log_success!(
                    codes::success::TABLE_INSTALLED,
                    "Truth table installed",
                    "file" => self.report.file_name,
                    "rows" => self.rows.len()
                );
                InstallOutcome::Accepted(self.report)
            }
            Err(conflict) if conflict.is_conflict() => {
                log_warning!(code = conflict.error_code(), &conflict.to_string(),
                    "file" => self.report.file_name);
                InstallOutcome::ConflictNeedsConfirmation(PendingInstall {
                    table: self,
                    conflict,
                })
            }
            Err(error) => {
                log_error!(error.error_code(), &error.to_string(),
                    "file" => self.report.file_name);
                InstallOutcome::Rejected(error.into())
            }
        }
    }
}

/// A table the model refused strictly, waiting for the user's decision
#[derive(Debug)]
pub struct PendingInstall {
    table: ParsedTable,
    conflict: ModelError,
}

impl PendingInstall {
    pub fn conflict(&self) -> &ModelError {
        &self.conflict
    }

    pub fn table(&self) -> &ParsedTable {
        &self.table
    }

    /// Messages for the confirmation prompt
    pub fn messages(&self) -> Vec<String> {
        vec![
            self.conflict.to_string(),
            TABLE_PARSE_ERROR_MESSAGE.to_string(),
        ]
    }

    /// Install despite the conflict
    pub fn force<M: TruthTableModel + ?Sized>(self, model: &mut M) -> Result<ImportReport, ImportError> {
        let table = self.table;
        match model.install_rows(&table.rows, InstallMode::Forced) {
            Ok(()) => {
                log_success!(
                    codes::success::TABLE_FORCE_INSTALLED,
                    "Truth table force-installed",
                    "file" => table.report.file_name,
                    "rows" => table.rows.len()
                );
                Ok(table.report)
            }
            Err(error) => {
                log_error!(codes::install::FORCED_INSTALL_FAILED, &error.to_string(),
                    "file" => table.report.file_name);
                Err(ImportError::ForcedInstall(error))
            }
        }
    }

    /// Abandon the import; nothing is installed
    pub fn decline(self) {
        log_success!(
            codes::success::INSTALL_DECLINED,
            "Import cancelled",
            "file" => self.table.report.file_name
        );
    }
}
