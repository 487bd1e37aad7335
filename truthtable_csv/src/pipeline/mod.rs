mod error;
mod install;
mod report;

pub use error::ImportError;
pub use install::{InstallOutcome, ParsedTable, PendingInstall, TABLE_PARSE_ERROR_MESSAGE};
pub use report::ImportReport;

use crate::builder::TableBuilder;
use crate::config::runtime::ImportPreferences;
use crate::document::ParsedDocument;
use crate::file_processor::FileProcessor;
use crate::header::interpret_header;
use crate::logging::{self, codes};
use crate::model::{Confirmation, TruthTableModel};
use crate::validation::RowValidator;
use std::path::Path;
use std::time::Instant;

/// How an import attempt ended without error
#[derive(Debug)]
pub enum ImportStatus {
    Installed(ImportReport),
    /// Installed after the user confirmed overriding row conflicts
    ForceInstalled(ImportReport),
    /// The user declined the conflict prompt; nothing was installed
    Declined,
}

/// Interpret a tokenized document (header -> rows -> entries)
pub fn parse_document(
    document: &ParsedDocument,
    preferences: &ImportPreferences,
) -> Result<ParsedTable, ImportError> {
    let start_time = Instant::now();
    let file_name = document.file_name.as_str();

    // A document without rows interprets as an empty header
    let header = interpret_header(file_name, document.header().unwrap_or(&[]))?;

    let row_statistics = RowValidator::for_header(file_name, &header)
        .with_row_statistics(preferences.log_row_statistics)
        .validate(document.data_rows())?;

    let rows = TableBuilder::for_header(file_name, &header).build(document.data_rows())?;

    let report = ImportReport {
        file_name: file_name.to_string(),
        inputs: header.inputs.vars().to_vec(),
        outputs: header.outputs.vars().to_vec(),
        input_bits: header.inputs.total_bits(),
        output_bits: header.outputs.total_bits(),
        row_statistics,
        file_size: None,
        unterminated_quote_lines: Vec::new(),
        processing_duration: start_time.elapsed(),
    };
    Ok(ParsedTable::new(header.inputs, header.outputs, rows, report))
}

/// Read, tokenize and interpret one file
pub fn parse_file(path: &Path, preferences: &ImportPreferences) -> Result<ParsedTable, ImportError> {
    let start_time = Instant::now();

    logging::with_file_context(path.to_path_buf(), || {
        preferences.validate()?;

        let file_result = FileProcessor::from_preferences(preferences).process_file(path)?;
        let (document, metrics) = crate::lexical::tokenize_file_result(&file_result, preferences);
        let mut table = parse_document(&document, preferences)?;

        let report = table.report_mut();
        report.file_size = Some(file_result.metadata.size);
        report.unterminated_quote_lines = metrics.unterminated_quote_lines;
        report.processing_duration = start_time.elapsed();
        report.log_success();

        Ok(table)
    })
}

/// Run a complete import attempt against a model
///
/// On a row conflict the confirmer is asked once; a refusal ends the attempt
/// with [`ImportStatus::Declined`] and leaves the model's table untouched.
pub fn import_file<M, C>(
    path: &Path,
    preferences: &ImportPreferences,
    model: &mut M,
    confirmer: &mut C,
) -> Result<ImportStatus, ImportError>
where
    M: TruthTableModel + ?Sized,
    C: Confirmation + ?Sized,
{
    logging::with_file_context(path.to_path_buf(), || {
        crate::log_info!("Starting truth-table import",
            "file" => path.display(),
            "separator" => preferences.separator,
            "quote" => preferences.quote);

        let table = parse_file(path, preferences)?;

        match table.install(model) {
            InstallOutcome::Accepted(report) => Ok(ImportStatus::Installed(report)),
            InstallOutcome::Rejected(error) => Err(error),
            InstallOutcome::ConflictNeedsConfirmation(pending) => {
                if confirmer.confirm(&pending.messages()) {
                    pending.force(model).map(ImportStatus::ForceInstalled)
                } else {
                    pending.decline();
                    Ok(ImportStatus::Declined)
                }
            }
        }
    })
}

/// Validate that every stage's diagnostic codes are registered
pub fn validate_pipeline() -> Result<(), String> {
    crate::log_debug!("Validating import pipeline configuration");

    crate::file_processor::init_file_processor_logging()?;
    crate::lexical::init_lexical_analysis_logging()?;

    for code in [
        codes::header::NO_SEPARATOR,
        codes::rows::NO_ENTRIES,
        codes::install::ROW_CONFLICT,
        codes::install::FORCED_INSTALL_FAILED,
        codes::success::TABLE_INSTALLED,
    ] {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!("Code {} not found in metadata registry", code));
        }
    }

    crate::log_success!(
        codes::success::SYSTEM_INITIALIZATION_COMPLETED,
        "Import pipeline validation succeeded",
        "stages_validated" => 5
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Cell;
    use crate::header::HeaderError;
    use crate::model::{AnalyzerModel, Entry, FixedAnswer};
    use crate::validation::RowError;
    use assert_matches::assert_matches;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    const ACCEPTED_HEADER: &str = "A,B[3..0],,,,|,D:3,D:2,D:1,D:0";

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    fn bits(value: usize, width: usize) -> Vec<String> {
        (0..width)
            .rev()
            .map(|bit| ((value >> bit) & 1).to_string())
            .collect()
    }

    /// Header plus 16 rows mapping B to D with A = 0
    fn accepted_example() -> String {
        let mut text = format!("{}\n", ACCEPTED_HEADER);
        for value in 0..16 {
            let b = bits(value, 4).join(",");
            let d = bits(15 - value, 4).join(",");
            text.push_str(&format!("0,{},,{}\n", b, d));
        }
        text
    }

    fn parse(content: &str) -> Result<ParsedTable, ImportError> {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "table.csv", content);
        parse_file(&path, &ImportPreferences::with_characters(',', '"'))
    }

    #[test]
    fn test_accepted_example() {
        let table = parse(&accepted_example()).unwrap();

        let inputs: Vec<_> = table.inputs().vars().iter().map(|v| (v.name.as_str(), v.width)).collect();
        let outputs: Vec<_> = table.outputs().vars().iter().map(|v| (v.name.as_str(), v.width)).collect();
        assert_eq!(inputs, vec![("A", 1), ("B", 4)]);
        assert_eq!(outputs, vec![("D", 4)]);
        assert_eq!(table.rows().len(), 16);
        assert!(table.rows().iter().all(|row| row.len() == 9));
        assert_eq!(table.report().row_count(), 16);
        assert!(table.report().file_size.is_some());
    }

    #[test]
    fn test_accepted_example_installs() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "table.csv", &accepted_example());
        let mut model = AnalyzerModel::new();

        let status = import_file(
            &path,
            &ImportPreferences::with_characters(',', '"'),
            &mut model,
            &mut FixedAnswer(false),
        )
        .unwrap();
        assert_matches!(status, ImportStatus::Installed(ref report) if report.row_count() == 16);

        let table = model.table().unwrap();
        // A=0, B=0b0011 -> D = 15 - 3 = 0b1100
        assert_eq!(table.output(0b00011, 0), Entry::One);
        assert_eq!(table.output(0b00011, 3), Entry::Zero);
        // A=1 is not covered by any row
        assert_eq!(table.output(0b10000, 0), Entry::DontCare);
    }

    #[test]
    fn test_ascending_indices_are_an_order_error() {
        assert_matches!(
            parse("D:0,D:1,D:2,D:3,|,A\n0,0,0,0,,1\n"),
            Err(ImportError::Header(HeaderError::BitOrder { .. }))
        );
    }

    #[test]
    fn test_missing_bits_are_reported() {
        assert_matches!(
            parse("B:3,B:1,|,A\n0,0,,1\n"),
            Err(ImportError::Header(HeaderError::BitNotSpecified { ref name, index: 0, .. })) if name == "B"
        );
    }

    #[test]
    fn test_missing_separator() {
        assert_matches!(
            parse("A,B,C\n0,1,0\n"),
            Err(ImportError::Header(HeaderError::NoSeparator { .. }))
        );
    }

    #[test]
    fn test_invalid_entry_cites_row_and_column() {
        let error = parse("A,B,|,Y\n0,0,,0\n0,2,,1\n").unwrap_err();
        assert_matches!(
            error,
            ImportError::Rows(RowError::InvalidEntry { line: 3, column: 2, ref entry, .. }) if entry == "2"
        );
        assert!(!error.is_io());
    }

    #[test]
    fn test_row_shape_mismatch() {
        assert_matches!(
            parse("A,B,|,Y\n0,0,,0\n0,1,,1,1\n"),
            Err(ImportError::Rows(RowError::ColumnCountMismatch { line: 3, found: 5, expected: 4, .. }))
        );
        // Blank lines are malformed rows
        assert_matches!(
            parse("A,|,Y\n0,,0\n\n1,,1\n"),
            Err(ImportError::Rows(RowError::ColumnCountMismatch { line: 3, found: 1, expected: 3, .. }))
        );
    }

    #[test]
    fn test_header_only_is_no_entries() {
        let error = parse("A,|,Y\n").unwrap_err();
        assert_matches!(error, ImportError::Rows(RowError::NoEntries { .. }));
        assert_eq!(error.error_code(), codes::rows::NO_ENTRIES);
    }

    #[test]
    fn test_missing_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        let error = parse_file(&dir.path().join("absent.csv"), &ImportPreferences::default())
            .unwrap_err();
        assert!(error.is_io());
    }

    #[test]
    fn test_bad_preferences_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", "A,|,Y\n0,,1\n");
        let result = parse_file(&path, &ImportPreferences::with_characters(',', ','));
        assert_matches!(result, Err(ImportError::Config(_)));
    }

    #[test]
    fn test_quoted_and_crlf_file() {
        let table = parse("\"A\",\"|\",Y\r\n\"0\",,\"1\"\r\n1,\"\",0\r\n").unwrap();
        assert_eq!(
            table.rows(),
            &[vec![Entry::Zero, Entry::One], vec![Entry::One, Entry::Zero]]
        );
    }

    #[test]
    fn test_custom_characters() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", "'A';'|';Y\n0;;1\n");
        let table = parse_file(&path, &ImportPreferences::with_characters(';', '\'')).unwrap();
        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn test_parse_document_without_rows() {
        let document = ParsedDocument::new("empty.csv", Vec::<Vec<Cell>>::new());
        assert_matches!(
            parse_document(&document, &ImportPreferences::default()),
            Err(ImportError::Header(HeaderError::NoSeparator { .. }))
        );
    }

    const CONFLICTING: &str = "A,|,Y\n0,,0\n-,,1\n";

    #[test]
    fn test_conflict_outcome_and_messages() {
        let table = parse(CONFLICTING).unwrap();
        let mut model = AnalyzerModel::new();

        let pending = match table.install(&mut model) {
            InstallOutcome::ConflictNeedsConfirmation(pending) => pending,
            other => panic!("expected a conflict, got {:?}", other),
        };
        assert_matches!(
            pending.conflict(),
            crate::model::ModelError::RowConflict { first_row: 1, second_row: 2 }
        );
        let messages = pending.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1], TABLE_PARSE_ERROR_MESSAGE);
        assert!(model.table().is_none());

        pending.decline();
        assert!(model.table().is_none());
    }

    #[test]
    fn test_declined_conflict_installs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", CONFLICTING);
        let mut model = AnalyzerModel::new();
        let mut asked = Vec::new();
        let mut confirmer = |messages: &[String]| {
            asked.extend_from_slice(messages);
            false
        };

        let status = import_file(&path, &ImportPreferences::default(), &mut model, &mut confirmer)
            .unwrap();
        assert_matches!(status, ImportStatus::Declined);
        assert!(model.table().is_none());
        assert_eq!(asked.len(), 2);
        assert!(asked[0].contains("rows 1 and 2"));
    }

    #[test]
    fn test_confirmed_conflict_is_forced_and_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", CONFLICTING);
        let prefs = ImportPreferences::default();

        let mut once = AnalyzerModel::new();
        let status = import_file(&path, &prefs, &mut once, &mut FixedAnswer(true)).unwrap();
        assert_matches!(status, ImportStatus::ForceInstalled(_));
        // The later don't-care row wins
        assert_eq!(once.table().unwrap().output(0, 0), Entry::One);

        let mut twice = AnalyzerModel::new();
        import_file(&path, &prefs, &mut twice, &mut FixedAnswer(true)).unwrap();
        import_file(&path, &prefs, &mut twice, &mut FixedAnswer(true)).unwrap();
        assert_eq!(once.table(), twice.table());
    }

    #[test]
    fn test_declaration_rejection_is_an_error() {
        struct RejectingModel;
        impl TruthTableModel for RejectingModel {
            fn declare_variables(
                &mut self,
                _inputs: &crate::variables::VariableList,
                _outputs: &crate::variables::VariableList,
            ) -> Result<(), crate::model::ModelError> {
                Err(crate::model::ModelError::DeclarationRejected {
                    reason: "analyzer is busy".to_string(),
                })
            }

            fn install_rows(
                &mut self,
                _rows: &[crate::model::TruthTableRow],
                _mode: crate::model::InstallMode,
            ) -> Result<(), crate::model::ModelError> {
                Ok(())
            }
        }

        let table = parse("A,|,Y\n0,,1\n").unwrap();
        assert_matches!(
            table.install(&mut RejectingModel),
            InstallOutcome::Rejected(ImportError::Model(_))
        );
    }

    #[test]
    fn test_forced_install_failure_is_fatal() {
        struct NoForceModel(AnalyzerModel);
        impl TruthTableModel for NoForceModel {
            fn declare_variables(
                &mut self,
                inputs: &crate::variables::VariableList,
                outputs: &crate::variables::VariableList,
            ) -> Result<(), crate::model::ModelError> {
                self.0.declare_variables(inputs, outputs)
            }

            fn install_rows(
                &mut self,
                rows: &[crate::model::TruthTableRow],
                mode: crate::model::InstallMode,
            ) -> Result<(), crate::model::ModelError> {
                match mode {
                    crate::model::InstallMode::Strict => self.0.install_rows(rows, mode),
                    crate::model::InstallMode::Forced => {
                        Err(crate::model::ModelError::Undeclared)
                    }
                }
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let path = write(&dir, "t.csv", CONFLICTING);
        let mut model = NoForceModel(AnalyzerModel::new());
        let error = import_file(&path, &ImportPreferences::default(), &mut model, &mut FixedAnswer(true))
            .unwrap_err();
        assert_matches!(error, ImportError::ForcedInstall(_));
        assert_eq!(error.error_code(), codes::install::FORCED_INSTALL_FAILED);
    }

    #[test]
    fn test_validate_pipeline() {
        assert!(validate_pipeline().is_ok());
    }
}
