//! Lexical stage: raw file text to a `ParsedDocument` of optional cells
//!
//! Tokenization never fails; malformed quoting is flushed as-is, counted in
//! the metrics and reported as a warning.

pub mod tokenizer;

use crate::config::runtime::ImportPreferences;
use crate::document::ParsedDocument;
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;

pub use tokenizer::{
    tokenize_line, tokenize_line_detailed, TokenizedLine, Tokenizer, TokenizerMetrics,
};

/// Tokenize a file read by the file processor with the given preferences
pub fn tokenize_file_result(
    file_result: &FileProcessingResult,
    preferences: &ImportPreferences,
) -> (ParsedDocument, TokenizerMetrics) {
    let mut tokenizer = Tokenizer::from_preferences(preferences);
    let document = tokenizer.tokenize_file_result(file_result);
    (document, tokenizer.metrics().clone())
}

/// Verify that the lexical codes are registered (for startup checks)
pub fn init_lexical_analysis_logging() -> Result<(), String> {
    for code in [
        codes::lexical::UNTERMINATED_QUOTE,
        codes::success::TOKENIZATION_COMPLETE,
    ] {
        if codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }
    Ok(())
}
