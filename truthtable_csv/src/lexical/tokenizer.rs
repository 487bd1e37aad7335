//! Line tokenizer: one raw text line to an ordered sequence of cells
//!
//! A single left-to-right scan driven by a three-state machine. Inside a
//! quoted field consecutive quote characters are counted as a run; when the
//! run ends every complete pair becomes one literal quote and an odd run
//! closes the field. Long escaped runs are resolved without backtracking.

use crate::config::runtime::ImportPreferences;
use crate::document::{Cell, ParsedDocument};
use crate::file_processor::FileProcessingResult;
use crate::logging::codes;
use crate::{log_debug, log_success, log_warning};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuoteState {
    NotInQuote,
    InQuote,
    /// Inside a quoted field, having just read `n` consecutive quotes
    CountingQuoteRun(usize),
}

/// Cells of one line plus whether a quoted field was left open
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedLine {
    pub cells: Vec<Cell>,
    pub unterminated_quote: bool,
}

fn finish_cell(buffer: &mut String) -> Cell {
    if buffer.is_empty() {
        None
    } else {
        Some(std::mem::take(buffer))
    }
}

fn push_quotes(buffer: &mut String, quote: char, count: usize) {
    buffer.extend(std::iter::repeat(quote).take(count));
}

/// Tokenize one line, reporting unterminated quoted fields
pub fn tokenize_line_detailed(line: &str, separator: char, quote: char) -> TokenizedLine {
    let mut cells = Vec::new();
    let mut buffer = String::new();
    let mut state = QuoteState::NotInQuote;

    for c in line.chars() {
        if let QuoteState::CountingQuoteRun(run) = state {
            if c == quote {
                state = QuoteState::CountingQuoteRun(run + 1);
                continue;
            }
            push_quotes(&mut buffer, quote, run / 2);
            if run % 2 == 0 {
                buffer.push(c);
                state = QuoteState::InQuote;
                continue;
            }
            // Odd run: the last quote closed the field, `c` is unquoted text
            state = QuoteState::NotInQuote;
        }

        match state {
            QuoteState::InQuote => {
                if c == quote {
                    state = QuoteState::CountingQuoteRun(1);
                } else {
                    buffer.push(c);
                }
            }
            _ => {
                if c == separator {
                    cells.push(finish_cell(&mut buffer));
                } else if c == quote {
                    state = QuoteState::InQuote;
                } else if c == '\r' {
                    continue;
                } else if c == '\n' {
                    break;
                } else {
                    buffer.push(c);
                }
            }
        }
    }

    let unterminated_quote = match state {
        QuoteState::NotInQuote => false,
        QuoteState::InQuote => true,
        QuoteState::CountingQuoteRun(run) => {
            push_quotes(&mut buffer, quote, run / 2);
            run % 2 == 0
        }
    };
    cells.push(finish_cell(&mut buffer));

    TokenizedLine {
        cells,
        unterminated_quote,
    }
}

/// Tokenize one line into cells
pub fn tokenize_line(line: &str, separator: char, quote: char) -> Vec<Cell> {
    tokenize_line_detailed(line, separator, quote).cells
}

/// Counters gathered while tokenizing a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenizerMetrics {
    pub line_count: usize,
    pub cell_count: usize,
    pub blank_cell_count: usize,
    pub max_cells_per_line: usize,
    /// 1-based lines whose quoted field ran to the end of the line
    pub unterminated_quote_lines: Vec<usize>,
}

impl TokenizerMetrics {
    fn record_line(&mut self, line_number: usize, tokenized: &TokenizedLine) {
        self.line_count += 1;
        self.cell_count += tokenized.cells.len();
        self.blank_cell_count += tokenized.cells.iter().filter(|c| c.is_none()).count();
        self.max_cells_per_line = self.max_cells_per_line.max(tokenized.cells.len());
        if tokenized.unterminated_quote {
            self.unterminated_quote_lines.push(line_number);
        }
    }
}

/// Whole-document tokenizer
#[derive(Debug, Clone)]
pub struct Tokenizer {
    separator: char,
    quote: char,
    metrics: TokenizerMetrics,
}

impl Tokenizer {
    pub fn new(separator: char, quote: char) -> Self {
        Self {
            separator,
            quote,
            metrics: TokenizerMetrics::default(),
        }
    }

    pub fn from_preferences(prefs: &ImportPreferences) -> Self {
        Self::new(prefs.separator, prefs.quote)
    }

    /// Split text into lines and tokenize each one
    ///
    /// A single trailing line terminator does not produce an extra row; blank
    /// interior lines are kept as one-blank-cell rows.
    pub fn tokenize_source(&mut self, file_name: &str, source: &str) -> ParsedDocument {
        self.metrics = TokenizerMetrics::default();

        log_debug!("Starting tokenization",
            "file" => file_name,
            "separator" => format!("{:?}", self.separator),
            "quote" => format!("{:?}", self.quote));

        let mut rows = Vec::new();
        for (index, line) in source.lines().enumerate() {
            let tokenized = tokenize_line_detailed(line, self.separator, self.quote);
            self.metrics.record_line(index + 1, &tokenized);
            if tokenized.unterminated_quote {
                log_warning!(
                    code = codes::lexical::UNTERMINATED_QUOTE,
                    "Quoted cell runs to the end of the line",
                    "file" => file_name,
                    "line" => index + 1
                );
            }
            rows.push(tokenized.cells);
        }

        log_success!(
            codes::success::TOKENIZATION_COMPLETE,
            "Tokenization completed",
            "file" => file_name,
            "lines" => self.metrics.line_count,
            "cells" => self.metrics.cell_count,
            "unterminated_quotes" => self.metrics.unterminated_quote_lines.len()
        );

        ParsedDocument::new(file_name, rows)
    }

    /// Tokenize the contents of a file read by the file processor
    pub fn tokenize_file_result(&mut self, file_result: &FileProcessingResult) -> ParsedDocument {
        self.tokenize_source(&file_result.metadata.file_name, &file_result.source)
    }

    pub fn metrics(&self) -> &TokenizerMetrics {
        &self.metrics
    }
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(',', '"')
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(s: &str) -> Cell {
        Some(s.to_string())
    }

    fn escape(value: &str, quote: char) -> String {
        let doubled: String = value
            .chars()
            .flat_map(|c| {
                if c == quote {
                    vec![c, c]
                } else {
                    vec![c]
                }
            })
            .collect();
        format!("{quote}{doubled}{quote}")
    }

    #[test]
    fn test_plain_cells() {
        assert_eq!(
            tokenize_line("A,B,C", ',', '"'),
            vec![some("A"), some("B"), some("C")]
        );
    }

    #[test]
    fn test_blank_cells_are_absent() {
        assert_eq!(
            tokenize_line("A,,,|", ',', '"'),
            vec![some("A"), None, None, some("|")]
        );
        assert_eq!(tokenize_line("", ',', '"'), vec![None]);
        assert_eq!(tokenize_line(",", ',', '"'), vec![None, None]);
    }

    #[test]
    fn test_quoted_header_example() {
        let cells = tokenize_line(r#""A","B[3..0]",,,,"|","D:3","D:2","D:1","D:0""#, ',', '"');
        assert_eq!(
            cells,
            vec![
                some("A"),
                some("B[3..0]"),
                None,
                None,
                None,
                some("|"),
                some("D:3"),
                some("D:2"),
                some("D:1"),
                some("D:0"),
            ]
        );
    }

    #[test]
    fn test_quote_runs_zero_to_four() {
        // Quoted field containing a run of n escaped quotes between 'a' and 'b'
        for n in 0..=4 {
            let value = format!("a{}b", "\"".repeat(n));
            let line = format!("{},z", escape(&value, '"'));
            assert_eq!(
                tokenize_line(&line, ',', '"'),
                vec![Some(value.clone()), some("z")],
                "run of {} quotes",
                n
            );
        }
    }

    #[test]
    fn test_raw_quote_run_lengths_inside_field() {
        // Run lengths as they appear on the line, inside an open quoted field
        assert_eq!(tokenize_line(r#""ab""#, ',', '"'), vec![some("ab")]);
        assert_eq!(tokenize_line(r#""a""b""#, ',', '"'), vec![some("a\"b")]);
        assert_eq!(tokenize_line(r#""a"""b"#, ',', '"'), vec![some("a\"b")]);
        assert_eq!(tokenize_line(r#""a""""b""#, ',', '"'), vec![some("a\"\"b")]);
    }

    #[test]
    fn test_quote_escaping_any_count() {
        for n in 0..8 {
            for value in [
                "\"".repeat(n),
                format!("x{}", "\"".repeat(n)),
                format!("{}x", "\"".repeat(n)),
            ] {
                let line = escape(&value, '"');
                let expected = if value.is_empty() { None } else { Some(value.clone()) };
                assert_eq!(tokenize_line(&line, ',', '"'), vec![expected], "value {:?}", value);
            }
        }
    }

    #[test]
    fn test_separator_inside_quotes_is_literal() {
        assert_eq!(
            tokenize_line(r#""a,b",c"#, ',', '"'),
            vec![some("a,b"), some("c")]
        );
        assert_eq!(
            tokenize_line(r#""a"",b",c"#, ',', '"'),
            vec![some("a\",b"), some("c")]
        );
    }

    #[test]
    fn test_text_after_closing_quote_resumes_buffering() {
        assert_eq!(tokenize_line(r#""ab"cd,e"#, ',', '"'), vec![some("abcd"), some("e")]);
        assert_eq!(tokenize_line(r#"ab"cd",e"#, ',', '"'), vec![some("abcd"), some("e")]);
    }

    #[test]
    fn test_empty_quoted_field_is_absent() {
        assert_eq!(tokenize_line(r#""",x"#, ',', '"'), vec![None, some("x")]);
    }

    #[test]
    fn test_carriage_return_dropped_and_line_feed_stops() {
        assert_eq!(tokenize_line("0,1\r", ',', '"'), vec![some("0"), some("1")]);
        assert_eq!(tokenize_line("0,1\n1,0", ',', '"'), vec![some("0"), some("1")]);
        assert_eq!(tokenize_line("\"0\"\r,1", ',', '"'), vec![some("0"), some("1")]);
    }

    #[test]
    fn test_unterminated_quote_is_flushed() {
        let line = tokenize_line_detailed(r#"a,"bc,d"#, ',', '"');
        assert_eq!(line.cells, vec![some("a"), some("bc,d")]);
        assert!(line.unterminated_quote);

        // Odd run of three at end of line closes the field
        let line = tokenize_line_detailed("\"ab\"\"\"", ',', '"');
        assert_eq!(line.cells, vec![some("ab\"")]);
        assert!(!line.unterminated_quote);

        // Even run of two at end of line leaves the field open
        let line = tokenize_line_detailed("\"ab\"\"", ',', '"');
        assert_eq!(line.cells, vec![some("ab\"")]);
        assert!(line.unterminated_quote);

        let line = tokenize_line_detailed("\"ab", ',', '"');
        assert_eq!(line.cells, vec![some("ab")]);
        assert!(line.unterminated_quote);
    }

    #[test]
    fn test_custom_separator_and_quote() {
        assert_eq!(
            tokenize_line("'A;B';C;;'it''s'", ';', '\''),
            vec![some("A;B"), some("C"), None, some("it's")]
        );
        assert_eq!(tokenize_line("A\tB", '\t', '"'), vec![some("A"), some("B")]);
    }

    #[test]
    fn test_round_trip_without_special_characters() {
        let alphabet = ["", "a", "B_1", "d e", "|"];
        let mut checked = 0;

        // Every sequence of length 1 to 4, blank runs at either end included
        for len in 1..=4u32 {
            for mut code in 0..alphabet.len().pow(len) {
                let mut parts = Vec::with_capacity(len as usize);
                for _ in 0..len {
                    parts.push(alphabet[code % alphabet.len()]);
                    code /= alphabet.len();
                }

                let expected: Vec<Cell> = parts
                    .iter()
                    .map(|p| if p.is_empty() { None } else { some(p) })
                    .collect();
                let line = parts.join(",");
                assert_eq!(tokenize_line(&line, ',', '"'), expected, "line {:?}", line);
                checked += 1;
            }
        }

        assert_eq!(checked, 5 + 25 + 125 + 625);
    }

    #[test]
    fn test_tokenize_source_and_metrics() {
        let mut tokenizer = Tokenizer::default();
        let doc = tokenizer.tokenize_source("t.csv", "A,|,B\r\n0,|,1\n\n1,\"|,0\n");

        assert_eq!(doc.rows().len(), 4);
        assert_eq!(doc.rows()[2], vec![None]);
        assert_eq!(doc.rows()[3], vec![some("1"), some("|,0")]);

        let metrics = tokenizer.metrics();
        assert_eq!(metrics.line_count, 4);
        assert_eq!(metrics.cell_count, 9);
        assert_eq!(metrics.blank_cell_count, 1);
        assert_eq!(metrics.max_cells_per_line, 3);
        assert_eq!(metrics.unterminated_quote_lines, vec![4]);
    }

    #[test]
    fn test_trailing_newline_does_not_add_row() {
        let mut tokenizer = Tokenizer::default();
        assert_eq!(tokenizer.tokenize_source("t.csv", "A,|,B\n").rows().len(), 1);
        assert_eq!(tokenizer.tokenize_source("t.csv", "A,|,B").rows().len(), 1);
    }
}
