//! Header interpreter: header cells to input and output variable lists

use super::context::{BitViolation, InterpretationContext};
use super::error::HeaderError;
use super::range::range_width;
use crate::document::Cell;
use crate::identifiers::{HdlIdentifierSyntax, IdentifierSyntax};
use crate::logging::codes;
use crate::variables::{Variable, VariableList};
use crate::{log_debug, log_error, log_success};
use serde::Serialize;

/// Marker character of the separator column
pub const SEPARATOR_MARKER: char = '|';

/// Result of a successful header scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterpretedHeader {
    pub inputs: VariableList,
    pub outputs: VariableList,
    /// Number of header cells; every data row must match it
    pub column_count: usize,
    /// 0-based column of the separator marker
    pub separator_column: usize,
}

/// Interprets one header row against an identifier syntax
pub struct HeaderInterpreter<'a, S: IdentifierSyntax + ?Sized> {
    syntax: &'a S,
    file_name: &'a str,
}

impl<'a> HeaderInterpreter<'a, HdlIdentifierSyntax> {
    /// Interpreter using the default identifier syntax
    pub fn with_default_syntax(file_name: &'a str) -> Self {
        static DEFAULT_SYNTAX: HdlIdentifierSyntax = HdlIdentifierSyntax;
        Self::new(&DEFAULT_SYNTAX, file_name)
    }
}

impl<'a, S: IdentifierSyntax + ?Sized> HeaderInterpreter<'a, S> {
    pub fn new(syntax: &'a S, file_name: &'a str) -> Self {
        Self { syntax, file_name }
    }

    /// Interpret a header into compile-time-capacity variable lists
    pub fn interpret(&self, header: &[Cell]) -> Result<InterpretedHeader, HeaderError> {
        self.interpret_into(header, VariableList::inputs(), VariableList::outputs())
    }

    /// Interpret a header into the given (empty) variable lists
    pub fn interpret_into(
        &self,
        header: &[Cell],
        inputs: VariableList,
        outputs: VariableList,
    ) -> Result<InterpretedHeader, HeaderError> {
        log_debug!("Interpreting header",
            "file" => self.file_name,
            "columns" => header.len());

        match self.scan(header, InterpretationContext::new(inputs, outputs)) {
            Ok(interpreted) => {
                log_success!(
                    codes::success::HEADER_INTERPRETED,
                    "Header interpreted",
                    "file" => self.file_name,
                    "inputs" => interpreted.inputs.len(),
                    "input_bits" => interpreted.inputs.total_bits(),
                    "outputs" => interpreted.outputs.len(),
                    "output_bits" => interpreted.outputs.total_bits()
                );
                Ok(interpreted)
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

    fn scan(
        &self,
        header: &[Cell],
        mut ctx: InterpretationContext,
    ) -> Result<InterpretedHeader, HeaderError> {
        let mut index = 0;
        while index < header.len() {
            let field = match &header[index] {
                Some(field) => field.as_str(),
                None => {
                    return Err(HeaderError::UnexpectedEmpty {
                        file: self.file(),
                        column: index + 1,
                    })
                }
            };

            if field.contains(SEPARATOR_MARKER) {
                if !ctx.mark_separator(index) {
                    return Err(HeaderError::DuplicateSeparator {
                        file: self.file(),
                        column: index + 1,
                    });
                }
            } else if let Some((name, bit)) = field.split_once(':') {
                self.indexed_column(&mut ctx, index, field, name, bit)?;
            } else if let Some(bracket) = field.find('[') {
                let width = self.ranged_column(&mut ctx, header, index, field, bracket)?;
                index += width - 1;
            } else {
                self.plain_column(&mut ctx, index, field)?;
            }
            index += 1;
        }

        self.finish(ctx, header.len())
    }

    /// `name:index` column
    fn indexed_column(
        &self,
        ctx: &mut InterpretationContext,
        index: usize,
        field: &str,
        name: &str,
        bit: &str,
    ) -> Result<(), HeaderError> {
        self.check_syntax(index, name)?;
        let bit_index = parse_bit_index(bit).ok_or_else(|| HeaderError::InvalidName {
            file: self.file(),
            column: index + 1,
            field: field.to_string(),
        })?;

        let active_side = ctx.active_side();
        if let Some(tracker) = ctx.tracker_mut(name) {
            if tracker.side() != active_side {
                return Err(HeaderError::VectorSplitAcrossSeparator {
                    file: self.file(),
                    column: index + 1,
                    name: name.to_string(),
                });
            }
            return tracker.record(bit_index).map_err(|violation| match violation {
                BitViolation::Order => HeaderError::BitOrder {
                    file: self.file(),
                    column: index + 1,
                    name: name.to_string(),
                    index: bit_index,
                },
                BitViolation::Duplicate => HeaderError::DuplicateBit {
                    file: self.file(),
                    column: index + 1,
                    name: name.to_string(),
                    index: bit_index,
                },
            });
        }

        self.check_unique(ctx, index, name)?;
        let width = bit_index.checked_add(1).ok_or_else(|| HeaderError::InvalidName {
            file: self.file(),
            column: index + 1,
            field: field.to_string(),
        })?;
        self.add_variable(ctx, index, field, Variable::new(name, width))?;
        ctx.start_tracker(name, bit_index);
        Ok(())
    }

    /// `name[hi..0]` or `name[n]` column followed by blank filler columns
    fn ranged_column(
        &self,
        ctx: &mut InterpretationContext,
        header: &[Cell],
        index: usize,
        field: &str,
        bracket: usize,
    ) -> Result<usize, HeaderError> {
        let (name, spec) = field.split_at(bracket);
        self.check_syntax(index, name)?;
        self.check_unique(ctx, index, name)?;

        let width = range_width(spec).ok_or_else(|| HeaderError::InvalidRange {
            file: self.file(),
            column: index + 1,
            field: field.to_string(),
        })?;

        let insufficient = || HeaderError::InsufficientFiller {
            file: self.file(),
            column: index + 1,
            field: field.to_string(),
            needed: width - 1,
        };
        let end = index.checked_add(width).ok_or_else(insufficient)?;
        let fillers = header.get(index + 1..end).ok_or_else(insufficient)?;
        if fillers.iter().any(Option::is_some) {
            return Err(insufficient());
        }

        self.add_variable(ctx, index, field, Variable::new(name, width))?;
        Ok(width)
    }

    /// Single-bit `name` column
    fn plain_column(
        &self,
        ctx: &mut InterpretationContext,
        index: usize,
        field: &str,
    ) -> Result<(), HeaderError> {
        self.check_syntax(index, field)?;
        self.check_unique(ctx, index, field)?;
        self.add_variable(ctx, index, field, Variable::new(field, 1))
    }

    fn check_syntax(&self, index: usize, name: &str) -> Result<(), HeaderError> {
        if self.syntax.is_acceptable(name) {
            Ok(())
        } else {
            Err(HeaderError::InvalidName {
                file: self.file(),
                column: index + 1,
                field: name.to_string(),
            })
        }
    }

    fn check_unique(
        &self,
        ctx: &InterpretationContext,
        index: usize,
        name: &str,
    ) -> Result<(), HeaderError> {
        if ctx.is_duplicate(name) {
            Err(HeaderError::DuplicateName {
                file: self.file(),
                column: index + 1,
                name: name.to_string(),
            })
        } else {
            Ok(())
        }
    }

    fn add_variable(
        &self,
        ctx: &mut InterpretationContext,
        index: usize,
        field: &str,
        var: Variable,
    ) -> Result<(), HeaderError> {
        let side = ctx.active_side();
        let max_bits = ctx.active_capacity();
        ctx.add_variable(var)
            .map_err(|_| HeaderError::CapacityExceeded {
                file: self.file(),
                column: index + 1,
                field: field.to_string(),
                side,
                max_bits,
            })
    }

    fn finish(
        &self,
        ctx: InterpretationContext,
        column_count: usize,
    ) -> Result<InterpretedHeader, HeaderError> {
        let separator_column = ctx.separator_column().ok_or_else(|| HeaderError::NoSeparator {
            file: self.file(),
        })?;

        if ctx.inputs.is_empty() {
            return Err(HeaderError::NoInputs { file: self.file() });
        }

        for tracker in ctx.trackers() {
            if let Some(missing) = tracker.first_missing() {
                return Err(HeaderError::BitNotSpecified {
                    file: self.file(),
                    name: tracker.name().to_string(),
                    index: missing,
                });
            }
        }

        debug_assert_eq!(separator_column, ctx.inputs.total_bits());

        Ok(InterpretedHeader {
            inputs: ctx.inputs,
            outputs: ctx.outputs,
            column_count,
            separator_column,
        })
    }

    fn file(&self) -> String {
        self.file_name.to_string()
    }
}

fn parse_bit_index(text: &str) -> Option<usize> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Interpret a header with the default identifier syntax
pub fn interpret_header(file_name: &str, header: &[Cell]) -> Result<InterpretedHeader, HeaderError> {
    HeaderInterpreter::with_default_syntax(file_name).interpret(header)
}
