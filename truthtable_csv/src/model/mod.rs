//! Target model collaborators and the in-crate reference model
//!
//! The import pipeline only talks to a model through [`TruthTableModel`] and
//! to the user through [`Confirmation`]; [`AnalyzerModel`] is the model the
//! command-line front end installs into.

pub mod analyzer;
pub mod entry;
pub mod error;
pub mod table;

pub use analyzer::AnalyzerModel;
pub use entry::{Entry, TruthTableRow};
pub use error::ModelError;
pub use table::{find_conflict, TruthTable};

use crate::variables::VariableList;

/// How strictly a model treats conflicting rows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InstallMode {
    /// Conflicting rows are an error
    Strict,
    /// Rows are accepted despite conflicts; the model decides which row wins
    Forced,
}

/// A model that can receive an imported table
pub trait TruthTableModel {
    /// Declare the input and output variables the next rows refer to
    fn declare_variables(
        &mut self,
        inputs: &VariableList,
        outputs: &VariableList,
    ) -> Result<(), ModelError>;

    /// Replace the visible rows
    fn install_rows(&mut self, rows: &[TruthTableRow], mode: InstallMode) -> Result<(), ModelError>;
}

/// Blocking yes/no question put to the user
pub trait Confirmation {
    fn confirm(&mut self, messages: &[String]) -> bool;
}

impl<F> Confirmation for F
where
    F: FnMut(&[String]) -> bool,
{
    fn confirm(&mut self, messages: &[String]) -> bool {
        self(messages)
    }
}

/// Confirmation that always gives the same answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedAnswer(pub bool);

impl Confirmation for FixedAnswer {
    fn confirm(&mut self, _messages: &[String]) -> bool {
        self.0
    }
}
