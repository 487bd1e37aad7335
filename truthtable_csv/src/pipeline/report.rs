use crate::validation::RowStatistics;
use crate::variables::Variable;
use serde::Serialize;
use std::time::Duration;

/// Summary of a successfully parsed table
#[derive(Debug, Clone, Serialize)]
pub struct ImportReport {
    pub file_name: String,
    pub inputs: Vec<Variable>,
    pub outputs: Vec<Variable>,
    pub input_bits: usize,
    pub output_bits: usize,
    pub row_statistics: RowStatistics,
    pub file_size: Option<u64>,
    /// 1-based lines whose quoted cell ran to the end of the line
    pub unterminated_quote_lines: Vec<usize>,
    pub processing_duration: Duration,
}

impl ImportReport {
    pub fn row_count(&self) -> usize {
        self.row_statistics.row_count
    }

    pub fn log_success(&self) {
        crate::log_success!(
            crate::logging::codes::success::OPERATION_COMPLETED_SUCCESSFULLY,
            "Truth table parsed",
            "file" => self.file_name,
            "inputs" => self.inputs.len(),
            "outputs" => self.outputs.len(),
            "rows" => self.row_count(),
            "duration_ms" => format!("{:.2}", self.processing_duration.as_secs_f64() * 1000.0)
        );
    }
}
